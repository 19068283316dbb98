//! Store-backed task state machine: claim, conditional transitions, scoped runs
//! and orphan recovery.
//!
//! Every status change is one SPARQL update whose WHERE clause pins the current
//! status, so concurrent loop instances never need an in-process lock.

use crate::config::HarvesterConfig;
use crate::error::{StoreError, TaskError};
use crate::sparql::{escape, prefixes, GraphStore};

use super::guard::BusyGuard;
use super::{ClaimedTask, TaskHandle, TaskStatus, TaskSummary};

pub struct TaskStateMachine<'a> {
    store: &'a dyn GraphStore,
    cfg: &'a HarvesterConfig,
}

impl<'a> TaskStateMachine<'a> {
    pub fn new(store: &'a dyn GraphStore, cfg: &'a HarvesterConfig) -> Self {
        Self { store, cfg }
    }

    fn jobs_graph(&self) -> String {
        escape::iri(&self.cfg.graphs.jobs)
    }

    fn status_iri(&self, status: TaskStatus) -> String {
        escape::iri(status.iri(&self.cfg.vocabulary))
    }

    fn operation_iri(&self) -> String {
        escape::iri(&self.cfg.vocabulary.harvest_operation)
    }

    /// Atomically move one scheduled harvesting task to busy and return it.
    ///
    /// The update picks an arbitrary eligible task and stamps it with a fresh
    /// claim token inside the same request; reading the token back tells this
    /// caller which task it won. `None` when nothing is scheduled.
    pub fn claim_next(&self) -> Result<Option<ClaimedTask>, StoreError> {
        let token = uuid::Uuid::new_v4().to_string();
        let update = format!(
            "{prefixes}\
DELETE {{
  GRAPH {graph} {{ ?task adms:status {scheduled} . }}
}}
INSERT {{
  GRAPH {graph} {{ ?task adms:status {busy} ; ext:harvestClaim {token} . }}
}}
WHERE {{
  {{
    SELECT ?task WHERE {{
      GRAPH {graph} {{ ?task adms:status {scheduled} ; task:operation {operation} . }}
    }}
    LIMIT 1
  }}
}}",
            prefixes = prefixes::header(&["task", "adms", "ext"]),
            graph = self.jobs_graph(),
            scheduled = self.status_iri(TaskStatus::Scheduled),
            busy = self.status_iri(TaskStatus::Busy),
            operation = self.operation_iri(),
            token = escape::literal(&token),
        );
        self.store.update(&update)?;

        let query = format!(
            "{prefixes}\
SELECT ?task ?operation WHERE {{
  GRAPH {graph} {{ ?task ext:harvestClaim {token} ; task:operation ?operation . }}
}}
LIMIT 1",
            prefixes = prefixes::header(&["task", "ext"]),
            graph = self.jobs_graph(),
            token = escape::literal(&token),
        );
        let results = self.store.query(&query)?;
        let claimed = results.bindings().first().and_then(|row| {
            Some(ClaimedTask {
                task: TaskHandle {
                    uri: row.get("task")?.value.clone(),
                    operation: row.get("operation")?.value.clone(),
                },
                claim: token.clone(),
            })
        });
        if let Some(c) = &claimed {
            tracing::info!(task = %c.task.uri, "claimed task");
        }
        Ok(claimed)
    }

    /// Conditional scheduled → busy for a known task, stamped with a claim token.
    /// `None` if the task was not scheduled (another caller won, or it never was).
    pub fn acquire(&self, task: &TaskHandle) -> Result<Option<ClaimedTask>, StoreError> {
        let token = uuid::Uuid::new_v4().to_string();
        let update = format!(
            "{prefixes}\
DELETE {{
  GRAPH {graph} {{ ?task adms:status ?status . }}
}}
INSERT {{
  GRAPH {graph} {{ ?task adms:status {busy} ; ext:harvestClaim {token} . }}
}}
WHERE {{
  GRAPH {graph} {{
    VALUES (?task ?status) {{ ({task} {scheduled}) }}
    ?task adms:status ?status .
  }}
}}",
            prefixes = prefixes::header(&["adms", "ext"]),
            graph = self.jobs_graph(),
            task = escape::iri(&task.uri),
            scheduled = self.status_iri(TaskStatus::Scheduled),
            busy = self.status_iri(TaskStatus::Busy),
            token = escape::literal(&token),
        );
        self.store.update(&update)?;

        let ask = format!(
            "{prefixes}ASK {{ GRAPH {graph} {{ {task} ext:harvestClaim {token} . }} }}",
            prefixes = prefixes::header(&["ext"]),
            graph = self.jobs_graph(),
            task = escape::iri(&task.uri),
            token = escape::literal(&token),
        );
        let won = self.store.query(&ask)?.boolean.unwrap_or(false);
        Ok(won.then(|| ClaimedTask {
            task: task.clone(),
            claim: token,
        }))
    }

    /// Change the task's status from `from` to `to`, linking `result_containers`.
    ///
    /// No-op when the stored status is not `from`. Edges outside the lifecycle
    /// are rejected before touching the store. Leaving busy drops the claim token.
    pub fn transition(
        &self,
        task: &TaskHandle,
        from: TaskStatus,
        to: TaskStatus,
        result_containers: &[String],
    ) -> Result<(), TaskError> {
        self.conditional_update(task, from, to, result_containers, None)
    }

    /// Move a claimed task out of busy, but only while it still carries this
    /// claim's token. A task recovered and claimed again since is left alone.
    pub fn release(
        &self,
        claimed: &ClaimedTask,
        to: TaskStatus,
        result_containers: &[String],
    ) -> Result<(), TaskError> {
        self.conditional_update(
            &claimed.task,
            TaskStatus::Busy,
            to,
            result_containers,
            Some(claimed.claim.as_str()),
        )
    }

    fn conditional_update(
        &self,
        task: &TaskHandle,
        from: TaskStatus,
        to: TaskStatus,
        result_containers: &[String],
        claim: Option<&str>,
    ) -> Result<(), TaskError> {
        if !from.can_transition_to(to) {
            return Err(TaskError::InvalidTransition { from, to });
        }
        let mut insert = format!("?task adms:status {} .", self.status_iri(to));
        for container in result_containers {
            insert.push_str(&format!(" ?task task:resultsContainer {} .", escape::iri(container)));
        }
        let (delete_claim, match_claim) = match (from == TaskStatus::Busy, claim) {
            (true, Some(token)) => (
                " ?task ext:harvestClaim ?claim .".to_string(),
                format!("\n    ?task ext:harvestClaim ?claim .\n    FILTER(?claim = {})", escape::literal(token)),
            ),
            (true, None) => (
                " ?task ext:harvestClaim ?claim .".to_string(),
                "\n    OPTIONAL { ?task ext:harvestClaim ?claim . }".to_string(),
            ),
            (false, _) => (String::new(), String::new()),
        };
        let update = format!(
            "{prefixes}\
DELETE {{
  GRAPH {graph} {{ ?task adms:status ?status .{delete_claim} }}
}}
INSERT {{
  GRAPH {graph} {{ {insert} }}
}}
WHERE {{
  GRAPH {graph} {{
    VALUES (?task ?status) {{ ({task} {from}) }}
    ?task adms:status ?status .{match_claim}
  }}
}}",
            prefixes = prefixes::header(&["task", "adms", "ext"]),
            graph = self.jobs_graph(),
            task = escape::iri(&task.uri),
            from = self.status_iri(from),
        );
        self.store.update(&update)?;
        tracing::debug!(task = %task.uri, %from, %to, containers = result_containers.len(), "transition");
        Ok(())
    }

    /// Run `body` for a claimed task and always leave busy before returning.
    ///
    /// `Ok(containers)` → success with those containers linked; `Err(e)` →
    /// failed, then `e` is returned. A panic in `body`, or a failing success
    /// transition, is caught by the guard which marks the task failed. All
    /// releases are tied to the claim token.
    pub fn run_scoped<F>(&self, claimed: ClaimedTask, body: F) -> Result<Vec<String>, TaskError>
    where
        F: FnOnce(&TaskHandle) -> Result<Vec<String>, TaskError>,
    {
        let guard = BusyGuard::new(self, &claimed);
        let task = &claimed.task;
        match body(task) {
            Ok(containers) => {
                self.release(&claimed, TaskStatus::Success, &containers)?;
                guard.disarm();
                tracing::info!(task = %task.uri, containers = containers.len(), "task succeeded");
                Ok(containers)
            }
            Err(err) => {
                guard.disarm();
                if let Err(e) = self.release(&claimed, TaskStatus::Failed, &[]) {
                    tracing::error!(task = %task.uri, "could not mark task failed: {}", e);
                }
                Err(err)
            }
        }
    }

    /// Force every busy harvesting task to failed. Returns how many were busy.
    ///
    /// Only safe when no loop instance is running: a task busy right now is
    /// indistinguishable from one orphaned by a crash.
    pub fn recover_orphans(&self) -> Result<usize, StoreError> {
        let query = format!(
            "{prefixes}\
SELECT DISTINCT ?task WHERE {{
  GRAPH {graph} {{ ?task adms:status {busy} ; task:operation {operation} . }}
}}",
            prefixes = prefixes::header(&["task", "adms"]),
            graph = self.jobs_graph(),
            busy = self.status_iri(TaskStatus::Busy),
            operation = self.operation_iri(),
        );
        let orphans: Vec<String> = self.store.query(&query)?.values("task").map(str::to_string).collect();

        let update = format!(
            "{prefixes}\
DELETE {{
  GRAPH {graph} {{ ?task adms:status {busy} . ?task ext:harvestClaim ?claim . }}
}}
INSERT {{
  GRAPH {graph} {{ ?task adms:status {failed} . }}
}}
WHERE {{
  GRAPH {graph} {{
    ?task adms:status {busy} ; task:operation {operation} .
    OPTIONAL {{ ?task ext:harvestClaim ?claim . }}
  }}
}}",
            prefixes = prefixes::header(&["task", "adms", "ext"]),
            graph = self.jobs_graph(),
            busy = self.status_iri(TaskStatus::Busy),
            failed = self.status_iri(TaskStatus::Failed),
            operation = self.operation_iri(),
        );
        self.store.update(&update)?;
        for task in &orphans {
            tracing::warn!(task = %task, "orphaned busy task marked failed");
        }
        Ok(orphans.len())
    }

    /// Current status of `task_uri`, if it has one this engine manages.
    pub fn status_of(&self, task_uri: &str) -> Result<Option<TaskStatus>, StoreError> {
        let query = format!(
            "{prefixes}SELECT ?status WHERE {{ GRAPH {graph} {{ {task} adms:status ?status . }} }}",
            prefixes = prefixes::header(&["adms"]),
            graph = self.jobs_graph(),
            task = escape::iri(task_uri),
        );
        let results = self.store.query(&query)?;
        let status = results
            .values("status")
            .find_map(|iri| TaskStatus::from_iri(iri, &self.cfg.vocabulary));
        Ok(status)
    }

    /// Result containers linked to `task_uri`.
    pub fn result_containers_of(&self, task_uri: &str) -> Result<Vec<String>, StoreError> {
        let query = format!(
            "{prefixes}SELECT DISTINCT ?container WHERE {{ GRAPH {graph} {{ {task} task:resultsContainer ?container . }} }}",
            prefixes = prefixes::header(&["task"]),
            graph = self.jobs_graph(),
            task = escape::iri(task_uri),
        );
        Ok(self.store.query(&query)?.values("container").map(str::to_string).collect())
    }

    /// All harvesting tasks with their status, ordered by URI.
    pub fn list_tasks(&self) -> Result<Vec<TaskSummary>, StoreError> {
        let query = format!(
            "{prefixes}\
SELECT ?task ?status (COUNT(DISTINCT ?container) AS ?containers) WHERE {{
  GRAPH {graph} {{
    ?task task:operation {operation} ; adms:status ?status .
    OPTIONAL {{ ?task task:resultsContainer ?container . }}
  }}
}}
GROUP BY ?task ?status
ORDER BY ?task",
            prefixes = prefixes::header(&["task", "adms"]),
            graph = self.jobs_graph(),
            operation = self.operation_iri(),
        );
        let results = self.store.query(&query)?;
        let tasks = results
            .bindings()
            .iter()
            .filter_map(|row| {
                let uri = row.get("task")?.value.clone();
                let status = row
                    .get("status")
                    .and_then(|t| TaskStatus::from_iri(&t.value, &self.cfg.vocabulary));
                let result_containers = row
                    .get("containers")
                    .and_then(|t| t.value.parse().ok())
                    .unwrap_or(0);
                Some(TaskSummary {
                    uri,
                    status,
                    result_containers,
                })
            })
            .collect();
        Ok(tasks)
    }
}
