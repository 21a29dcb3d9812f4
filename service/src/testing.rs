//! Test doubles and fixtures shared by the unit suites.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use tracerr::Traced;

use crate::{
    infra::{
        api::{self, Api, Call, Reply},
        vault::Memory,
    },
    Service,
};

/// Scripted [`Api`] double replying from a fixed queue.
///
/// Every received [`Call`] is recorded for later assertions. Executing a
/// [`Call`] with an exhausted queue panics: a test must script exactly the
/// calls it expects.
#[derive(Debug, Default)]
pub(crate) struct ScriptedApi {
    /// Scripted [`Reply`]s, consumed in order.
    replies: Mutex<VecDeque<Reply>>,

    /// [`Call`]s received so far.
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    /// Creates a new [`ScriptedApi`] replying with the provided [`Reply`]s.
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the [`Call`]s received so far.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the paths of the [`Call`]s received so far.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

impl Api<Call> for ScriptedApi {
    type Ok = Reply;
    type Err = Traced<api::Error>;

    async fn execute(&self, call: Call) -> Result<Self::Ok, Self::Err> {
        self.calls.lock().unwrap().push(call);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted call"))
    }
}

/// Creates a [`Service`] over a [`ScriptedApi`] and an empty in-[`Memory`]
/// vault.
pub(crate) fn service(
    replies: impl IntoIterator<Item = Reply>,
) -> Service<ScriptedApi, Memory> {
    Service::new(ScriptedApi::new(replies), Memory::default())
}

/// [`Reply`] enveloping the provided `result` with a success status.
pub(crate) fn ok(result: serde_json::Value) -> Reply {
    Reply {
        status: 200,
        body: Some(serde_json::json!({
            "code": 200,
            "message": null,
            "result": result,
        })),
    }
}

/// [`Reply`] carrying an error envelope with the provided status.
pub(crate) fn rejected(status: u16, message: &str) -> Reply {
    Reply {
        status,
        body: Some(serde_json::json!({
            "code": status,
            "message": message,
            "result": null,
        })),
    }
}

/// Bodyless [`Reply`] with the provided status.
pub(crate) fn bare(status: u16) -> Reply {
    Reply { status, body: None }
}

/// Signed JWT carrying the provided claims.
pub(crate) fn jwt(claims: &serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

/// Signed access token for user `7` expiring in `exp_in` seconds
/// (negative values produce an already expired token).
pub(crate) fn access_token(exp_in: i64) -> String {
    jwt(&serde_json::json!({
        "id": 7,
        "email": "a@b.com",
        "role": "DEVELOPER",
        "permissions": [
            {
                "module": "Projects",
                "canView": true,
                "canCreate": true,
                "canUpdate": false,
                "canDelete": false,
            },
        ],
        "exp": common::DateTime::now().unix_timestamp() + exp_in,
    }))
}

/// JSON of a board task.
pub(crate) fn task_json(id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": "",
        "priority": "MEDIUM",
        "status": status,
        "dueDate": "2026-09-01",
    })
}
