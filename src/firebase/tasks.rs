//! Cloud Firestore
//!
//! Task store over the tasks collection. Documents look like
//! `{ text, completed, userId, createdAt }`.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{backend_error, call_method, get, set, FirebaseBackend};
use taskty_core::backend::{
    ErrorCallback, SnapshotCallback, Subscription, TaskOrder, TaskQuery, TaskStore,
};
use taskty_core::domain::{BackendError, BackendResult, NewTask, Task, TaskId, UserId};

#[wasm_bindgen(raw_module = "https://www.gstatic.com/firebasejs/9.23.0/firebase-firestore.js")]
extern "C" {
    fn collection(db: &JsValue, path: &str) -> JsValue;

    fn doc(db: &JsValue, path: &str, id: &str) -> JsValue;

    #[wasm_bindgen(catch, js_name = addDoc)]
    async fn add_doc(collection: &JsValue, data: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = updateDoc)]
    async fn update_doc(doc: &JsValue, data: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = deleteDoc)]
    async fn delete_doc(doc: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(variadic)]
    fn query(collection: &JsValue, constraints: Box<[JsValue]>) -> JsValue;

    #[wasm_bindgen(js_name = "where")]
    fn where_(field: &str, op: &str, value: &JsValue) -> JsValue;

    #[wasm_bindgen(js_name = orderBy)]
    fn order_by(field: &str, direction: &str) -> JsValue;

    fn limit(count: u32) -> JsValue;

    #[wasm_bindgen(js_name = onSnapshot)]
    fn on_snapshot(
        query: &JsValue,
        next: &Closure<dyn FnMut(JsValue)>,
        error: &Closure<dyn FnMut(JsValue)>,
    ) -> js_sys::Function;

    #[wasm_bindgen(js_name = serverTimestamp)]
    fn server_timestamp() -> JsValue;
}

#[derive(Serialize)]
struct CompletedUpdate {
    completed: bool,
}

impl FirebaseBackend {
    fn tasks_ref(&self) -> JsValue {
        collection(&self.db, &self.collection)
    }

    fn task_ref(&self, id: &TaskId) -> JsValue {
        doc(&self.db, &self.collection, id.as_str())
    }

    fn build_query(&self, task_query: &TaskQuery) -> JsValue {
        let mut constraints = vec![where_(
            "userId",
            "==",
            &JsValue::from_str(task_query.owner.as_str()),
        )];
        if task_query.order == TaskOrder::CreatedDesc {
            constraints.push(order_by("createdAt", "desc"));
        }
        if let Some(max) = task_query.limit {
            constraints.push(limit(max as u32));
        }
        query(&self.tasks_ref(), constraints.into_boxed_slice())
    }
}

fn task_from_doc(doc: &JsValue) -> BackendResult<Task> {
    let id = get(doc, "id")?
        .as_string()
        .ok_or_else(|| BackendError::with_message("Document without id"))?;
    let data = call_method(doc, "data")?;

    // Null until the server acknowledges a local write
    let created = get(&data, "createdAt")?;
    let created_at = if created.is_object() {
        call_method(&created, "toMillis")?
            .as_f64()
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
    } else {
        None
    };

    Ok(Task {
        id: TaskId(id),
        text: get(&data, "text")?.as_string().unwrap_or_default(),
        completed: get(&data, "completed")?.as_bool().unwrap_or(false),
        user_id: UserId(get(&data, "userId")?.as_string().unwrap_or_default()),
        created_at,
    })
}

fn tasks_from_snapshot(snapshot: &JsValue) -> BackendResult<Vec<Task>> {
    let docs: js_sys::Array = get(snapshot, "docs")?.into();
    docs.iter().map(|doc| task_from_doc(&doc)).collect()
}

#[async_trait(?Send)]
impl TaskStore for FirebaseBackend {
    async fn create_task(&self, task: NewTask) -> BackendResult<TaskId> {
        let data: JsValue = js_sys::Object::new().into();
        set(&data, "text", &JsValue::from_str(&task.text))?;
        set(&data, "completed", &JsValue::FALSE)?;
        set(&data, "userId", &JsValue::from_str(task.user_id.as_str()))?;
        set(&data, "createdAt", &server_timestamp())?;

        let doc_ref = add_doc(&self.tasks_ref(), &data)
            .await
            .map_err(backend_error)?;
        let id = get(&doc_ref, "id")?
            .as_string()
            .ok_or_else(|| BackendError::with_message("addDoc returned no id"))?;
        Ok(TaskId(id))
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> BackendResult<()> {
        let data = serde_wasm_bindgen::to_value(&CompletedUpdate { completed })
            .map_err(|e| BackendError::with_message(format!("Serialization error: {}", e)))?;
        update_doc(&self.task_ref(id), &data)
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        delete_doc(&self.task_ref(id)).await.map_err(backend_error)?;
        Ok(())
    }

    fn watch(
        &self,
        task_query: TaskQuery,
        on_next: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> BackendResult<Subscription> {
        let js_query = self.build_query(&task_query);

        let failed = on_error.clone();
        let next = Closure::<dyn FnMut(JsValue)>::new(move |snapshot: JsValue| {
            match tasks_from_snapshot(&snapshot) {
                Ok(tasks) => on_next(tasks),
                Err(err) => failed(err),
            }
        });
        let error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
            on_error(backend_error(err));
        });

        let unsubscribe = on_snapshot(&js_query, &next, &error);
        Ok(Subscription::new(move || {
            let _ = unsubscribe.call0(&JsValue::NULL);
            drop(next);
            drop(error);
        }))
    }
}
