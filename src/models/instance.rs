//! Validated CVRP instance.

use log::debug;

use super::Vehicle;
use crate::distance::DistanceMatrix;
use crate::error::InvalidInstance;
use crate::evaluation::{CapacityTracker, Transit};

/// A validated capacitated vehicle routing instance.
///
/// Holds the cost matrix, per-node demands, the fleet and the depot. Once
/// built, an instance is immutable and every accessor can be used in hot
/// loops without re-validation.
///
/// # Examples
///
/// ```
/// use cvrp_gls::models::Instance;
///
/// let instance = Instance::new(
///     &[
///         vec![0.0, 2.0, 3.0],
///         vec![2.0, 0.0, 1.0],
///         vec![3.0, 1.0, 0.0],
///     ],
///     vec![0, 4, 5],
///     &[10, 10],
///     2,
///     0,
/// )
/// .unwrap();
/// assert_eq!(instance.num_nodes(), 3);
/// assert_eq!(instance.num_vehicles(), 2);
/// assert_eq!(instance.customers().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    distances: DistanceMatrix,
    demands: Vec<i64>,
    vehicles: Vec<Vehicle>,
    depot: usize,
}

impl Instance {
    /// Validates raw instance data.
    ///
    /// `num_vehicles` and `depot` are taken signed so that out-of-range
    /// input from the I/O layer is reported instead of wrapped.
    pub fn new(
        distance_matrix: &[Vec<f64>],
        demands: Vec<i64>,
        vehicle_capacities: &[i64],
        num_vehicles: i64,
        depot: i64,
    ) -> Result<Self, InvalidInstance> {
        let distances = DistanceMatrix::from_rows(distance_matrix)?;
        Self::with_matrix(distances, demands, vehicle_capacities, num_vehicles, depot)
    }

    /// Like [`Instance::new`], for an already built matrix.
    pub fn with_matrix(
        distances: DistanceMatrix,
        demands: Vec<i64>,
        vehicle_capacities: &[i64],
        num_vehicles: i64,
        depot: i64,
    ) -> Result<Self, InvalidInstance> {
        let nodes = distances.size();
        if demands.len() != nodes {
            return Err(InvalidInstance::DemandLength {
                demands: demands.len(),
                nodes,
            });
        }

        if num_vehicles <= 0 {
            return Err(InvalidInstance::NoVehicles { num_vehicles });
        }
        let num_vehicles = num_vehicles as usize;
        if num_vehicles > vehicle_capacities.len() {
            return Err(InvalidInstance::NotEnoughCapacities {
                num_vehicles,
                capacities: vehicle_capacities.len(),
            });
        }

        if depot < 0 || depot as usize >= nodes {
            return Err(InvalidInstance::DepotOutOfRange { depot, nodes });
        }
        let depot = depot as usize;

        if let Some((node, &demand)) = demands.iter().enumerate().find(|(_, &d)| d < 0) {
            return Err(InvalidInstance::NegativeDemand { node, demand });
        }

        let vehicles: Vec<Vehicle> = vehicle_capacities[..num_vehicles]
            .iter()
            .enumerate()
            .map(|(id, &capacity)| Vehicle::new(id, capacity))
            .collect();
        if let Some(v) = vehicles.iter().find(|v| v.capacity() < 0) {
            return Err(InvalidInstance::NegativeCapacity {
                vehicle: v.id(),
                capacity: v.capacity(),
            });
        }

        if demands[depot] != 0 {
            return Err(InvalidInstance::DepotDemand {
                depot,
                demand: demands[depot],
            });
        }

        let instance = Self {
            distances,
            demands,
            vehicles,
            depot,
        };

        let demand = instance.total_demand();
        let capacity = instance.total_capacity();
        if demand > capacity {
            return Err(InvalidInstance::InsufficientCapacity { demand, capacity });
        }

        debug!(
            "instance: {} nodes, {} vehicles, depot {}, demand {}/{}, symmetric={}",
            nodes,
            num_vehicles,
            depot,
            demand,
            capacity,
            instance.distances.is_symmetric(1e-9)
        );

        Ok(instance)
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of non-depot nodes.
    pub fn num_customers(&self) -> usize {
        self.num_nodes() - 1
    }

    /// The depot node.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Demand of a node.
    #[inline]
    pub fn demand(&self, node: usize) -> i64 {
        self.demands[node]
    }

    /// Demand vector, indexed by node.
    pub fn demands(&self) -> &[i64] {
        &self.demands
    }

    /// The fleet, indexed by vehicle id.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Capacity of a vehicle.
    #[inline]
    pub fn capacity(&self, vehicle: usize) -> i64 {
        self.vehicles[vehicle].capacity()
    }

    /// Iterates the non-depot nodes in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes()).filter(move |&node| node != self.depot)
    }

    /// Sum of all non-depot demands, widened so it cannot overflow.
    pub fn total_demand(&self) -> i128 {
        self.customers().map(|node| i128::from(self.demands[node])).sum()
    }

    /// Sum of the capacities of the fleet, widened like [`Instance::total_demand`].
    pub fn total_capacity(&self) -> i128 {
        self.vehicles.iter().map(|v| i128::from(v.capacity())).sum()
    }

    /// The cost matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Cost lookup bound to this instance.
    pub fn transit(&self) -> Transit<'_> {
        Transit::new(&self.distances)
    }

    /// Capacity checks bound to this instance.
    pub fn capacity_tracker(&self) -> CapacityTracker<'_> {
        CapacityTracker::new(&self.demands, &self.vehicles)
    }
}
