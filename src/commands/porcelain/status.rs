use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::report::StatusReport;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Render the five status sections and return the underlying report
    pub fn status(&self) -> anyhow::Result<StatusReport> {
        let head = self.head_commit()?;
        let worktree = self.workspace().snapshot()?;

        let report = {
            let index = self.index();
            let inspector =
                Inspector::new(head.files(), index.staged(), index.removed(), &worktree);
            let changes = inspector.inspect();

            StatusReport {
                branches: self.refs().list_branches()?,
                current_branch: self.current_branch()?,
                staged: index.staged().keys().cloned().collect(),
                removed: index.removed().iter().cloned().collect(),
                not_staged: changes.not_staged,
                untracked: changes.untracked,
            }
        };

        self.print_status(&report)?;
        Ok(report)
    }

    fn print_status(&self, report: &StatusReport) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &report.branches {
            if branch == &report.current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &report.staged {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &report.removed {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for change in &report.not_staged {
            writeln!(writer, "{change}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &report.untracked {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
