mod fleet_api_port;

pub use fleet_api_port::{
    AcceptedStatus, ApiOutcome, CatalogQuery, FleetApiPort, Mutation, MutationKind,
};
