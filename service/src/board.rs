//! [`Board`] definitions.

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{update_task_status, Command as _, UpdateTaskStatus},
    domain::{project, task, Task},
    infra::{
        api::{self, Api, Call, Reply},
        Vault,
    },
    query::{self, tasks::MineForProject, Query as _},
    Service,
};

/// Kanban board of a project's tasks, partitioned by [`task::Status`].
///
/// Owns the in-memory task set between reloads. A move is a small saga:
/// the [`Task`] is reassigned locally first, the remote status update is
/// awaited, and a rejection compensates by reapplying the prior
/// [`task::Status`] before surfacing the error.
///
/// Within a column, tasks keep their last-loaded order: no explicit sort
/// key is tracked, and a moved [`Task`] keeps its load position among the
/// target column's tasks.
#[derive(Debug)]
pub struct Board {
    /// ID of the [`Project`] this [`Board`] displays.
    ///
    /// [`Project`]: crate::domain::Project
    project: project::Id,

    /// [`Task`]s of this [`Board`], in last-loaded order.
    tasks: Vec<Task>,

    /// [`Task`] currently lifted by a drag gesture, if any.
    dragged: Option<task::Id>,

    /// Message of the last failed operation, if any.
    ///
    /// Cleared by [`Board::load`] and any later successful move.
    error: Option<String>,
}

impl Board {
    /// Creates a new empty [`Board`] for the provided [`Project`].
    ///
    /// [`Project`]: crate::domain::Project
    #[must_use]
    pub fn new(project: project::Id) -> Self {
        Self {
            project,
            tasks: Vec::new(),
            dragged: None,
            error: None,
        }
    }

    /// Returns the ID of the [`Project`] this [`Board`] displays.
    ///
    /// [`Project`]: crate::domain::Project
    #[must_use]
    pub fn project(&self) -> project::Id {
        self.project
    }

    /// Returns all the [`Task`]s of this [`Board`] in last-loaded order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the [`Task`]s of the provided [`task::Status`] column, in
    /// last-loaded order.
    pub fn column(
        &self,
        status: task::Status,
    ) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Returns the message of the last failed operation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Lifts the provided [`Task`] for a drag gesture.
    ///
    /// Returns `false` (and lifts nothing) if this [`Board`] tracks no such
    /// [`Task`].
    pub fn begin_drag(&mut self, id: task::Id) -> bool {
        let known = self.tasks.iter().any(|t| t.id == id);
        self.dragged = known.then_some(id);
        known
    }

    /// Returns the [`Task`] currently lifted by a drag gesture, if any.
    ///
    /// Rendered independently of its source column while the gesture is in
    /// progress.
    #[must_use]
    pub fn dragged(&self) -> Option<&Task> {
        let id = self.dragged?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Cancels the drag gesture in progress, if any.
    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    /// Reloads this [`Board`] with the current user's [`Task`]s of its
    /// project, replacing all local state and clearing any error.
    ///
    /// On failure the previous [`Task`]s are dropped and the error is
    /// recorded, so a rendering layer observes an empty errored [`Board`].
    ///
    /// # Errors
    ///
    /// Returns an error if the [`Task`]s cannot be fetched.
    pub async fn load<A, V>(
        &mut self,
        service: &Service<A, V>,
    ) -> Result<(), Traced<LoadError>>
    where
        A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
        V: Vault,
    {
        use LoadError as E;

        self.dragged = None;
        match service.execute(MineForProject(self.project)).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.tasks = Vec::new();
                self.error = Some(e.to_string());
                Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
            }
        }
    }

    /// Drops the currently dragged [`Task`] onto the provided
    /// [`task::Status`] column.
    ///
    /// A no-op returning `Ok` when no [`Task`] is lifted. The gesture ends
    /// either way.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::move_task`] errors.
    pub async fn drop_on<A, V>(
        &mut self,
        service: &Service<A, V>,
        status: task::Status,
    ) -> Result<(), Traced<MoveError>>
    where
        A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
        V: Vault,
    {
        let Some(id) = self.dragged.take() else {
            return Ok(());
        };
        self.move_task(service, id, status).await
    }

    /// Moves the provided [`Task`] into the provided [`task::Status`]
    /// column.
    ///
    /// A move into the [`Task`]'s current column is a pure no-op: no call
    /// is issued. Otherwise the [`Task`] is reassigned locally first and
    /// the remote update is awaited; a rejection reapplies the prior
    /// [`task::Status`] and records the error.
    ///
    /// # Errors
    ///
    /// Returns an error if this [`Board`] tracks no such [`Task`], or the
    /// remote update is rejected.
    pub async fn move_task<A, V>(
        &mut self,
        service: &Service<A, V>,
        id: task::Id,
        status: task::Status,
    ) -> Result<(), Traced<MoveError>>
    where
        A: Api<Call, Ok = Reply, Err = Traced<api::Error>>,
        V: Vault,
    {
        use MoveError as E;

        self.dragged = None;

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Err(tracerr::new!(E::UnknownTask(id)));
        };
        let prior = task.status;
        if prior == status {
            return Ok(());
        }

        // Optimistic reassignment: the move renders before the backend
        // confirms it.
        task.status = status;

        let result = service
            .execute(UpdateTaskStatus {
                task: id,
                project: self.project,
                status,
            })
            .await;

        match result {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("moving task {id} to {status} failed: {e}");
                // Compensate: reapply the prior status.
                if let Some(task) =
                    self.tasks.iter_mut().find(|t| t.id == id)
                {
                    task.status = prior;
                }
                self.error = Some(e.to_string());
                Err(e).map_err(tracerr::map_from_and_wrap!(=> E))
            }
        }
    }
}

/// Error of loading a [`Board`].
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// Fetching the [`Task`]s failed.
    #[display("failed to load the board: {_0}")]
    Query(query::ExecutionError),
}

/// Error of moving a [`Task`] on a [`Board`].
#[derive(Debug, Display, Error, From)]
pub enum MoveError {
    /// [`Board`] tracks no such [`Task`].
    #[display("no task {_0} on the board")]
    #[from(ignore)]
    UnknownTask(#[error(not(source))] task::Id),

    /// Remote status update was rejected.
    #[display("failed to update the task status: {_0}")]
    Update(update_task_status::ExecutionError),
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::task::Status,
        infra::vault::{Key, Vault as _},
        testing,
    };

    use super::Board;

    /// Authenticated [`testing::service`] scripted with the provided
    /// [`Reply`]s.
    ///
    /// [`Reply`]: crate::infra::api::Reply
    fn service(
        replies: impl IntoIterator<Item = crate::infra::api::Reply>,
    ) -> crate::Service<testing::ScriptedApi, crate::infra::vault::Memory>
    {
        let service = testing::service(replies);
        service
            .vault()
            .store(Key::AccessToken, testing::access_token(600));
        service
    }

    #[tokio::test]
    async fn load_partitions_tasks_by_status() {
        let service = service([testing::ok(json!([
            testing::task_json(1, "TODO"),
            testing::task_json(2, "IN_PROGRESS"),
            testing::task_json(3, "TODO"),
            testing::task_json(4, "COMPLETED"),
        ]))]);
        let mut board = Board::new(10.into());

        board.load(&service).await.unwrap();

        // Every task lands in exactly one column.
        let mut seen = Vec::new();
        for status in Status::ALL {
            for task in board.column(status) {
                assert_eq!(task.status, status);
                seen.push(task.id);
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, [1.into(), 2.into(), 3.into(), 4.into()]);

        // Columns keep the load order.
        let todo: Vec<_> =
            board.column(Status::Todo).map(|t| t.id).collect();
        assert_eq!(todo, [1.into(), 3.into()]);
        assert_eq!(board.error(), None);
    }

    #[tokio::test]
    async fn load_failure_empties_board_and_records_error() {
        let service = service([testing::rejected(403, "not a member")]);
        let mut board = Board::new(10.into());

        assert!(board.load(&service).await.is_err());
        assert!(board.tasks().is_empty());
        assert!(board.error().is_some());
    }

    #[tokio::test]
    async fn same_status_move_issues_no_call() {
        let service = service([testing::ok(json!([
            testing::task_json(1, "TODO"),
        ]))]);
        let mut board = Board::new(10.into());
        board.load(&service).await.unwrap();

        board
            .move_task(&service, 1.into(), Status::Todo)
            .await
            .unwrap();

        // Only the load itself reached the backend.
        assert_eq!(service.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn move_commits_optimistic_update_on_success() {
        let service = service([
            testing::ok(json!([testing::task_json(1, "TODO")])),
            testing::ok(json!(true)),
        ]);
        let mut board = Board::new(10.into());
        board.load(&service).await.unwrap();

        board
            .move_task(&service, 1.into(), Status::InProgress)
            .await
            .unwrap();

        assert_eq!(board.column(Status::InProgress).count(), 1);
        assert_eq!(board.column(Status::Todo).count(), 0);
        assert_eq!(board.error(), None);

        let calls = service.api().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].path, "api/tasks/1/projects/10/status");
        assert_eq!(
            calls[1].body,
            Some(json!({"status": "IN_PROGRESS"})),
        );
    }

    #[tokio::test]
    async fn rejected_move_rolls_back_and_records_error() {
        let service = service([
            testing::ok(json!([testing::task_json(1, "TODO")])),
            testing::rejected(409, "task is locked"),
        ]);
        let mut board = Board::new(10.into());
        board.load(&service).await.unwrap();

        let result =
            board.move_task(&service, 1.into(), Status::InProgress).await;

        assert!(result.is_err());
        // The optimistic move is compensated, not merely reported.
        assert_eq!(board.column(Status::Todo).count(), 1);
        assert_eq!(board.column(Status::InProgress).count(), 0);
        assert!(board.error().unwrap().contains("task is locked"));
    }

    #[tokio::test]
    async fn unknown_task_move_fails_without_a_call() {
        let service = service([]);
        let mut board = Board::new(10.into());

        assert!(board
            .move_task(&service, 1.into(), Status::Todo)
            .await
            .is_err());
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn drag_gesture_lifecycle() {
        let service = service([
            testing::ok(json!([testing::task_json(1, "TODO")])),
            testing::ok(json!(true)),
        ]);
        let mut board = Board::new(10.into());
        board.load(&service).await.unwrap();

        assert!(board.begin_drag(1.into()));
        assert_eq!(board.dragged().map(|t| t.id), Some(1.into()));
        assert!(!board.begin_drag(2.into()));
        assert!(board.dragged().is_none());

        assert!(board.begin_drag(1.into()));
        board.drop_on(&service, Status::Completed).await.unwrap();
        assert!(board.dragged().is_none());
        assert_eq!(board.column(Status::Completed).count(), 1);
    }
}
