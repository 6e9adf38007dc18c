//! Generated gRPC clients and thin per-service wrappers around them.

pub mod order;
pub mod user;

/// `tonic-build`-generated message and client stubs for the two downstream
/// services.
pub mod pb {
    pub mod users {
        tonic::include_proto!("users");
    }

    pub mod orders {
        tonic::include_proto!("orders");
    }
}
