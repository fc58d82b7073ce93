//! Conda environment file generation
//!
//! Standard-channel records go straight into `dependencies`; pip-channel
//! records are rendered in pip grammar under a nested `pip:` list.

use serde::Serialize;

use crate::error::Result;
use crate::record::{Channel, Record};
use crate::render::{Target, render_record};

/// One item of an environment file's `dependencies` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvDependency {
    Spec(String),
    Pip { pip: Vec<String> },
}

/// A conda `environment.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentFile {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    pub dependencies: Vec<EnvDependency>,
}

impl EnvironmentFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Build the dependency list from extracted records
    pub fn from_records(name: impl Into<String>, records: &[Record]) -> Self {
        let mut env = Self::new(name);
        env.add_records(records);
        env
    }

    /// Append records, keeping manifest order within each channel.
    ///
    /// `pip` itself is added to the conda dependencies when pip-channel
    /// records are present and it is not already listed.
    pub fn add_records(&mut self, records: &[Record]) {
        let (pip, standard): (Vec<&Record>, Vec<&Record>) =
            records.iter().partition(|r| r.channel == Channel::Pip);

        for record in &standard {
            self.dependencies
                .push(EnvDependency::Spec(render_record(record, Target::Conda)));
        }

        if pip.is_empty() {
            return;
        }

        let has_pip = self.dependencies.iter().any(|d| match d {
            EnvDependency::Spec(spec) => is_pip_spec(spec),
            EnvDependency::Pip { .. } => false,
        });
        if !has_pip {
            self.dependencies.push(EnvDependency::Spec("pip".to_string()));
        }

        let lines: Vec<String> = pip.iter().map(|r| render_record(r, Target::Pip)).collect();
        let existing = self
            .dependencies
            .iter()
            .position(|d| matches!(d, EnvDependency::Pip { .. }));
        match existing {
            Some(index) => {
                if let EnvDependency::Pip { pip } = &mut self.dependencies[index] {
                    pip.extend(lines);
                }
            }
            None => self.dependencies.push(EnvDependency::Pip { pip: lines }),
        }
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn is_pip_spec(spec: &str) -> bool {
    spec.strip_prefix("pip")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['=', '<', '>', '!', '~']))
}
