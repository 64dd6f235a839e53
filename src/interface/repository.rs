use crate::interface::output::Logger;
use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Clone `url` into `target` with the system `git`
pub fn clone_repository(url: &str, target: &Path, logger: &Logger) -> Result<()> {
    logger.info(&format!("Cloning {} into {}", url, target.display()));

    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target)
        .output()
        .map_err(|e| Error::RepositoryClone {
            url: url.to_string(),
            message: format!("could not run git: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::RepositoryClone {
            url: url.to_string(),
            message: match stderr.trim() {
                "" => format!("git exited with {}", output.status),
                message => message.to_string(),
            },
        });
    }

    logger.verbose(&String::from_utf8_lossy(&output.stderr));
    Ok(())
}
