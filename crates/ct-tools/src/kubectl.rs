//! Kubectl integration

use crate::error::Result;
use crate::exec::ProcessExecutor;

/// Cluster operations needed around an install
pub trait Kubectl {
    /// Wait until every deployment in `namespace` has rolled out
    ///
    /// `selector` restricts the deployments to one release when the namespace
    /// is shared.
    fn wait_for_deployments(&self, namespace: &str, selector: Option<&str>) -> Result<()>;

    /// Delete a namespace and everything in it
    fn delete_namespace(&self, namespace: &str) -> Result<()>;
}

/// [`Kubectl`] backed by the `kubectl` binary
#[derive(Debug, Clone, Default)]
pub struct KubectlCli {
    exec: ProcessExecutor,
}

impl KubectlCli {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Kubectl for KubectlCli {
    fn wait_for_deployments(&self, namespace: &str, selector: Option<&str>) -> Result<()> {
        let mut args = vec![
            "get".to_string(),
            "deployments".to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
            "--output".to_string(),
            "jsonpath={.items[*].metadata.name}".to_string(),
        ];
        if let Some(selector) = selector {
            args.push("--selector".to_string());
            args.push(selector.to_string());
        }

        let output = self.exec.run_process_and_capture_output("kubectl", &args)?;
        for deployment in output.split_whitespace() {
            tracing::info!("Waiting for deployment '{}' to be ready...", deployment);
            self.exec.run_process(
                "kubectl",
                [
                    "rollout",
                    "status",
                    "deployment",
                    deployment,
                    "--namespace",
                    namespace,
                ],
            )?;
        }
        Ok(())
    }

    fn delete_namespace(&self, namespace: &str) -> Result<()> {
        tracing::info!("Deleting namespace '{}'...", namespace);
        self.exec.run_process(
            "kubectl",
            ["delete", "namespace", namespace, "--wait=true"],
        )
    }
}
