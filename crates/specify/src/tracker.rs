//! Step-by-step progress display for `specify init`

use console::style;
use specify_projects::ProgressSink;

/// Lifecycle of a tracked step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Error,
    Skipped,
}

/// One labelled step
#[derive(Debug, Clone)]
pub struct Step {
    pub key: String,
    pub label: String,
    pub status: StepStatus,
    pub detail: Option<String>,
}

/// Ordered set of steps, printed as each one settles.
///
/// Steps are keyed; updating a key that was never added appends it with the
/// key as its label so out-of-order reports are never lost.
pub struct StepTracker {
    title: String,
    steps: Vec<Step>,
    render: bool,
    title_shown: bool,
}

impl StepTracker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
            render: true,
            title_shown: false,
        }
    }

    /// Tracker that records state without printing
    #[cfg(test)]
    pub fn silent(title: impl Into<String>) -> Self {
        Self {
            render: false,
            ..Self::new(title)
        }
    }

    /// Mark a step as intentionally not run
    pub fn skip(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Skipped, Some(detail));
    }

    #[cfg(test)]
    pub fn status(&self, key: &str) -> Option<StepStatus> {
        self.find(key).map(|s| s.status)
    }

    #[cfg(test)]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.find(key).and_then(|s| s.detail.as_deref())
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    fn find(&self, key: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.key == key)
    }

    fn update(&mut self, key: &str, status: StepStatus, detail: Option<&str>) {
        let index = match self.steps.iter().position(|s| s.key == key) {
            Some(i) => i,
            None => {
                self.steps.push(Step {
                    key: key.to_string(),
                    label: key.to_string(),
                    status: StepStatus::Pending,
                    detail: None,
                });
                self.steps.len() - 1
            }
        };

        let step = &mut self.steps[index];
        step.status = status;
        if let Some(detail) = detail {
            step.detail = Some(detail.to_string()).filter(|d| !d.is_empty());
        }

        if self.render && status != StepStatus::Running {
            let line = render_step(&self.steps[index]);
            if !self.title_shown {
                self.title_shown = true;
                println!("\n{}", style(&self.title).cyan().bold());
            }
            println!("{}", line);
        }
    }
}

impl ProgressSink for StepTracker {
    fn add(&mut self, key: &str, label: &str) {
        match self.steps.iter_mut().find(|s| s.key == key) {
            Some(step) => step.label = label.to_string(),
            None => self.steps.push(Step {
                key: key.to_string(),
                label: label.to_string(),
                status: StepStatus::Pending,
                detail: None,
            }),
        }
    }

    fn start(&mut self, key: &str) {
        self.update(key, StepStatus::Running, None);
    }

    fn complete(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Done, Some(detail));
    }

    fn error(&mut self, key: &str, detail: &str) {
        self.update(key, StepStatus::Error, Some(detail));
    }
}

fn render_step(step: &Step) -> String {
    let symbol = match step.status {
        StepStatus::Done => style("●").green(),
        StepStatus::Error => style("●").red(),
        StepStatus::Skipped => style("○").yellow(),
        StepStatus::Running => style("○").cyan(),
        StepStatus::Pending => style("○").dim(),
    };

    // only the first line of a multi-line error fits on the step row
    match step.detail.as_deref().and_then(|d| d.lines().next()) {
        Some(detail) => format!(
            "├── {} {} {}",
            symbol,
            step.label,
            style(format!("({})", detail)).dim()
        ),
        None => format!("├── {} {}", symbol, step.label),
    }
}
