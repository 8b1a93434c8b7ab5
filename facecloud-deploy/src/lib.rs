//! Facecloud Deploy
//!
//! Declaration of the infrastructure that runs the face segmentation API:
//! a GKE cluster, the container image of the service, and the Kubernetes
//! workload on top of it.
//!
//! Nothing here talks to a cloud. Declarations are rendered to text
//! (kubeconfig, manifests, outputs) and applied by external tools.

pub mod cluster;
pub mod error;
pub mod image;
pub mod kubeconfig;
pub mod manifests;
pub mod outputs;
pub mod profile;
pub mod stack;
pub mod workload;

pub use cluster::{ClusterSpec, NodeConfig};
pub use error::{DeployError, Result};
pub use image::ImageSpec;
pub use kubeconfig::KubeAuth;
pub use profile::Profile;
pub use stack::{StackDeclaration, declare};
