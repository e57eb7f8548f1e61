//! 集群层：客户端抽象与实现（kube / Mock）

pub mod kubernetes;
pub mod mock;
pub mod traits;

pub use kubernetes::KubeJobClient;
pub use mock::{ClientCall, MockJobClient};
pub use traits::{
    scavenger_job_gvk, scavenger_job_resource, ClientError, JobClient, SCAVENGER_JOB_GROUP,
    SCAVENGER_JOB_KIND, SCAVENGER_JOB_VERSION,
};
