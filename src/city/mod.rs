//! City layer - occupancy grid, road partitioning, and building lots

pub mod building;
pub mod grid;
pub mod layout;
pub mod partition;

pub use building::{cell_to_world, BuildingLots};
pub use grid::OccupancyGrid;
pub use layout::{generate_city, CityLayout};
pub use partition::{partition, PartitionParams, PartitionSummary, Rect, RoadStrip, SplitAxis};
