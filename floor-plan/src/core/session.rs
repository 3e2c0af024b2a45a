//! Session context
//!
//! One [`Session`] per signed-in terminal. It owns the active restaurant,
//! the active employee and the running alert workflow, and is passed by
//! reference to the components that need them. Logging out ends it.

use serde::Serialize;
use shared::models::{Alert, EmployeeResponse, Role, StoreInfo};
use shared::{AppError, AppResult, ErrorCode};
use uuid::Uuid;

use crate::utils::permissions::{self, ALERTS_HANDLE};
use crate::workflow::AlertWorkflow;

/// Employee signed into the session with their resolved role
#[derive(Debug, Clone, Serialize)]
pub struct ActiveEmployee {
    pub employee: EmployeeResponse,
    pub role: Role,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: i64,
    store: StoreInfo,
    employee: Option<ActiveEmployee>,
    workflow: Option<AlertWorkflow>,
}

impl Session {
    /// Start a session for `store`
    pub fn start(store: StoreInfo) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: shared::util::now_millis(),
            store,
            employee: None,
            workflow: None,
        };
        tracing::info!(
            session_id = %session.id,
            store_id = session.store.id,
            "Session started"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn store(&self) -> &StoreInfo {
        &self.store
    }

    /// Switch to another restaurant; the employee and workflow belong to
    /// the previous one and are dropped.
    pub fn switch_store(&mut self, store: StoreInfo) {
        tracing::info!(
            session_id = %self.id,
            from = self.store.id,
            to = store.id,
            "Switching restaurant"
        );
        self.store = store;
        self.employee = None;
        self.workflow = None;
    }

    /// Sign `employee` in with `role`
    pub fn sign_in(&mut self, employee: EmployeeResponse, role: Role) -> AppResult<()> {
        if employee.role_id != role.id {
            return Err(AppError::with_message(
                ErrorCode::RoleNotFound,
                format!("Role {} does not belong to employee {}", role.id, employee.id),
            ));
        }
        if !employee.is_active || !role.is_active {
            return Err(AppError::permission_denied(format!(
                "Employee {} is not active",
                employee.username
            )));
        }

        tracing::info!(
            session_id = %self.id,
            employee_id = employee.id,
            role = %role.name,
            "Employee signed in"
        );
        self.employee = Some(ActiveEmployee { employee, role });
        self.workflow = None;
        Ok(())
    }

    pub fn sign_out(&mut self) {
        if let Some(active) = self.employee.take() {
            tracing::info!(
                session_id = %self.id,
                employee_id = active.employee.id,
                "Employee signed out"
            );
        }
        self.workflow = None;
    }

    pub fn employee(&self) -> Option<&ActiveEmployee> {
        self.employee.as_ref()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.employee
            .as_ref()
            .is_some_and(|a| permissions::permission_granted(&a.role.permissions, permission))
    }

    /// `NotAuthenticated` without an employee, `PermissionDenied` without the permission
    pub fn require_permission(&self, permission: &str) -> AppResult<()> {
        if self.employee.is_none() {
            return Err(AppError::not_authenticated());
        }
        if !self.has_permission(permission) {
            return Err(AppError::permission_denied(format!(
                "Missing permission {permission}"
            ))
            .with_detail("permission", permission));
        }
        Ok(())
    }

    /// Start walking `alerts`, replacing any running workflow
    pub fn start_workflow(&mut self, alerts: Vec<Alert>) -> AppResult<&mut AlertWorkflow> {
        self.require_permission(ALERTS_HANDLE)?;
        tracing::debug!(session_id = %self.id, alerts = alerts.len(), "Alert workflow started");
        Ok(self.workflow.insert(AlertWorkflow::new(alerts)))
    }

    pub fn workflow(&self) -> Option<&AlertWorkflow> {
        self.workflow.as_ref()
    }

    pub fn workflow_mut(&mut self) -> AppResult<&mut AlertWorkflow> {
        self.workflow
            .as_mut()
            .ok_or_else(|| AppError::new(ErrorCode::WorkflowNotStarted))
    }

    /// Stop the running workflow and hand it back
    pub fn finish_workflow(&mut self) -> Option<AlertWorkflow> {
        self.workflow.take()
    }

    /// Logout: consume the session
    pub fn end(self) {
        let duration_ms = shared::util::now_millis() - self.started_at;
        tracing::info!(session_id = %self.id, duration_ms, "Session ended");
    }
}
