//! Per-vehicle route.

/// An ordered sequence of stops served by a single vehicle.
///
/// A route starts and ends at the depot, which is not stored in `nodes`.
/// The route keeps its total load in sync with every mutation, so callers
/// pass the demand of the node being added or removed. The load saturates
/// at `i64::MAX`; such a route already exceeds every capacity.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::Route;
///
/// let mut route = Route::new(0);
/// route.push(3, 5);
/// route.push(1, 2);
/// assert_eq!(route.nodes(), &[3, 1]);
/// assert_eq!(route.load(), 7);
/// assert_eq!(route.vehicle_id(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    nodes: Vec<usize>,
    load: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            nodes: Vec::new(),
            load: 0,
        }
    }

    /// Appends a stop at the tail of this route.
    pub fn push(&mut self, node: usize, demand: i64) {
        self.nodes.push(node);
        self.load = self.load.saturating_add(demand);
    }

    /// Inserts a stop before position `pos`.
    pub fn insert(&mut self, pos: usize, node: usize, demand: i64) {
        self.nodes.insert(pos, node);
        self.load = self.load.saturating_add(demand);
    }

    /// Removes and returns the stop at `pos`.
    pub fn remove(&mut self, pos: usize, demand: i64) -> usize {
        self.load -= demand;
        self.nodes.remove(pos)
    }

    /// Replaces the stop at `pos`, returning the previous node.
    pub fn replace(&mut self, pos: usize, node: usize, old_demand: i64, new_demand: i64) -> usize {
        self.load = (self.load - old_demand).saturating_add(new_demand);
        std::mem::replace(&mut self.nodes[pos], node)
    }

    /// Reverses the stops in `from..=to`.
    pub fn reverse(&mut self, from: usize, to: usize) {
        self.nodes[from..=to].reverse();
    }

    /// Moves the segment `start..start + len` so that it begins at `target`
    /// in the route obtained after removing it. Orientation is kept.
    pub fn move_segment(&mut self, start: usize, len: usize, target: usize) {
        let segment: Vec<usize> = self.nodes.drain(start..start + len).collect();
        self.nodes.splice(target..target, segment);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the intermediate stops in visit order.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Returns the number of stops (excluding depot).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the vehicle goes straight from depot to depot.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total demand served by this route.
    pub fn load(&self) -> i64 {
        self.load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Route {
        let mut r = Route::new(1);
        r.push(5, 2);
        r.push(3, 4);
        r.push(7, 1);
        r
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 0);
        assert_eq!(r.load(), 0);
    }

    #[test]
    fn test_route_push() {
        let r = sample();
        assert_eq!(r.len(), 3);
        assert_eq!(r.nodes(), &[5, 3, 7]);
        assert_eq!(r.load(), 7);
    }

    #[test]
    fn test_insert_remove() {
        let mut r = sample();
        r.insert(1, 9, 10);
        assert_eq!(r.nodes(), &[5, 9, 3, 7]);
        assert_eq!(r.load(), 17);
        assert_eq!(r.remove(0, 2), 5);
        assert_eq!(r.nodes(), &[9, 3, 7]);
        assert_eq!(r.load(), 15);
    }

    #[test]
    fn test_replace() {
        let mut r = sample();
        assert_eq!(r.replace(2, 8, 1, 6), 7);
        assert_eq!(r.nodes(), &[5, 3, 8]);
        assert_eq!(r.load(), 12);
    }

    #[test]
    fn test_reverse() {
        let mut r = sample();
        r.reverse(0, 1);
        assert_eq!(r.nodes(), &[3, 5, 7]);
        assert_eq!(r.load(), 7);
    }

    #[test]
    fn test_move_segment() {
        let mut r = Route::new(0);
        for node in 1..=5 {
            r.push(node, 1);
        }
        // [1, 2, 3, 4, 5] -> take [2, 3], remainder [1, 4, 5], insert at 2
        r.move_segment(1, 2, 2);
        assert_eq!(r.nodes(), &[1, 4, 2, 3, 5]);

        // Move the tail to the front.
        r.move_segment(4, 1, 0);
        assert_eq!(r.nodes(), &[5, 1, 4, 2, 3]);
        assert_eq!(r.load(), 5);
    }
}
