// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::env::{DeployEnv, ExecuteError};
use crate::registry;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("The '{0}' named account wasn't set")]
    NamedAccountNotSet(&'static str),
    #[error(transparent)]
    Registry(#[from] registry::Error),
    #[error(transparent)]
    Execution(#[from] ExecuteError),
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Task '{task}' depends on '{dependency}', which is neither a registered task nor an existing deployment")]
    UnresolvedDependency { task: String, dependency: String },
    #[error("Dependency cycle involving tasks: {0}")]
    DependencyCycle(String),
    #[error("Task '{task}' failed: {source}")]
    Task {
        task: String,
        #[source]
        source: TaskError,
    },
}

/// One deployment step. Tasks are registered under a tag and may declare
/// dependencies on other tags; the runner orders execution accordingly.
#[async_trait]
pub trait DeployTask: Send + Sync {
    fn tag(&self) -> &'static str;

    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    async fn run(&self, env: &dyn DeployEnv) -> Result<(), TaskError>;
}

#[derive(Default)]
pub struct TaskRunner {
    tasks: Vec<Box<dyn DeployTask>>,
}

impl TaskRunner {
    pub fn register(&mut self, task: impl DeployTask + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Run the registered tasks in dependency order. When `tag` is given, only the
    /// tasks registered under that tag (plus their registered dependencies) run.
    ///
    /// A dependency naming no registered task is satisfied iff a deployment record of
    /// that name already exists; otherwise nothing runs at all.
    pub async fn run(&self, env: &dyn DeployEnv, tag: Option<&str>) -> Result<(), RunnerError> {
        let order = self.execution_order(env, tag)?;

        for index in order {
            let task = &self.tasks[index];
            info!("Running deploy task: {}", task.tag());
            task.run(env).await.map_err(|source| RunnerError::Task {
                task: task.tag().to_string(),
                source,
            })?;
        }

        Ok(())
    }

    fn execution_order(
        &self,
        env: &dyn DeployEnv,
        tag: Option<&str>,
    ) -> Result<Vec<usize>, RunnerError> {
        let by_tag: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (task.tag(), index))
            .collect();

        // Select the requested tasks plus their registered dependencies, transitively.
        let mut selected = vec![false; self.tasks.len()];
        let mut queue: VecDeque<usize> = match tag {
            Some(tag) => self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.tag() == tag)
                .map(|(index, _)| index)
                .collect(),
            None => (0..self.tasks.len()).collect(),
        };
        while let Some(index) = queue.pop_front() {
            if selected[index] {
                continue;
            }
            selected[index] = true;
            for dependency in self.tasks[index].dependencies() {
                if let Some(&dep_index) = by_tag.get(dependency) {
                    queue.push_back(dep_index);
                }
            }
        }

        // Kahn's algorithm over the selected tasks. Dependencies outside the
        // registered set must already be satisfied by a deployment record.
        let mut indegree = vec![0usize; self.tasks.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.tasks.len()];
        for (index, task) in self.tasks.iter().enumerate() {
            if !selected[index] {
                continue;
            }
            for dependency in task.dependencies() {
                match by_tag.get(dependency) {
                    Some(&dep_index) => {
                        indegree[index] += 1;
                        dependents[dep_index].push(index);
                    }
                    None => {
                        if env.get_deployment(dependency).is_err() {
                            return Err(RunnerError::UnresolvedDependency {
                                task: task.tag().to_string(),
                                dependency: dependency.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..self.tasks.len())
            .filter(|&index| selected[index] && indegree[index] == 0)
            .collect();
        let mut order = Vec::new();
        while let Some(index) = ready.pop_front() {
            order.push(index);
            for &dependent in &dependents[index] {
                indegree[dependent] -= 1;
                if indegree[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        let selected_count = selected.iter().filter(|selected| **selected).count();
        if order.len() != selected_count {
            let remaining: Vec<&str> = (0..self.tasks.len())
                .filter(|index| selected[*index] && !order.contains(index))
                .map(|index| self.tasks[index].tag())
                .collect();
            return Err(RunnerError::DependencyCycle(remaining.join(", ")));
        }

        Ok(order)
    }
}
