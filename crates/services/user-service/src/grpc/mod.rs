//! gRPC boundary: request validation, conversion and error classification.

mod user_grpc;


pub use user_grpc::{normalize_pagination, UserGrpcService};
