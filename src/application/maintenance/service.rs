//! Maintenance task lifecycle, technician assignment and admin notices

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::events::{Event, SharedEventBus, TaskStatusChangedEvent};
use crate::application::notifications::NotificationService;
use crate::domain::maintenance::{
    MaintenancePriority, MaintenanceStatus, MaintenanceTask, TaskNotice,
};
use crate::domain::staff::{Staff, StaffRole};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::mail::{MailMessage, Mailer};
use crate::shared::{format_short, non_blank, parse_datetime};

#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub task_id: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    /// Registered equipment item; its name fills in a missing `equipment` label
    pub equipment_id: Option<i64>,
    pub technician_id: Option<i64>,
    pub due_date: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub required_parts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub equipment: Option<String>,
    pub equipment_id: Option<i64>,
    pub due_date: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub required_parts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TechnicianTaskStats {
    pub total_tasks: usize,
    pub assigned_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
    pub on_hold_tasks: usize,
}

impl TechnicianTaskStats {
    pub fn from_tasks(tasks: &[MaintenanceTask]) -> Self {
        let count = |status| tasks.iter().filter(|t| t.status == status).count();
        Self {
            total_tasks: tasks.len(),
            assigned_tasks: count(MaintenanceStatus::Assigned),
            in_progress_tasks: count(MaintenanceStatus::InProgress),
            completed_tasks: count(MaintenanceStatus::Completed),
            on_hold_tasks: count(MaintenanceStatus::OnHold),
        }
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        MaintenanceTask::add_unique(&mut out, &value);
    }
    out
}

fn assignment_email(task: &MaintenanceTask, technician: &Staff) -> MailMessage {
    let mut body = format!(
        "Dear {},\n\nA new maintenance task has been assigned to you.\n\n\
         Task ID: {}\nDescription: {}\nPriority: {}\nEstimated duration: {} minutes\n",
        technician.full_name(),
        task.task_id,
        task.description,
        task.priority,
        task.estimated_duration_minutes,
    );
    if let Some(due) = task.due_date {
        body.push_str(&format!("Due date: {}\n", format_short(due)));
    }
    if let Some(equipment) = &task.equipment {
        body.push_str(&format!("Equipment: {}\n", equipment));
    }
    if !task.required_skills.is_empty() {
        body.push_str(&format!("Required skills: {}\n", task.required_skills.join(", ")));
    }
    if !task.required_parts.is_empty() {
        body.push_str(&format!("Required parts: {}\n", task.required_parts.join(", ")));
    }
    body.push_str("\nBest regards,\nImasProject Team");

    MailMessage::new(
        &technician.email,
        format!("New Maintenance Task Assigned - {}", task.task_id),
        body,
    )
}

pub fn notice_message(notice: TaskNotice, task: &MaintenanceTask, technician_name: &str) -> String {
    format!(
        "Technician {} has {} maintenance task {} ({})",
        technician_name,
        notice.verb(),
        task.task_id,
        task.description
    )
}

pub struct MaintenanceService {
    repos: Arc<dyn RepositoryProvider>,
    notifications: Arc<NotificationService>,
    mailer: Arc<dyn Mailer>,
    event_bus: SharedEventBus,
}

impl MaintenanceService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifications: Arc<NotificationService>,
        mailer: Arc<dyn Mailer>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            notifications,
            mailer,
            event_bus,
        }
    }

    // ── Lookup ────────────────────────────────────────────────

    pub async fn get(&self, task_id: &str) -> DomainResult<MaintenanceTask> {
        self.repos
            .maintenance_tasks()
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", "taskId", task_id))
    }

    pub async fn list(&self) -> DomainResult<Vec<MaintenanceTask>> {
        self.repos.maintenance_tasks().find_all().await
    }

    pub async fn by_status(&self, status: &str) -> DomainResult<Vec<MaintenanceTask>> {
        let status = MaintenanceStatus::parse(status)?;
        self.repos.maintenance_tasks().find_by_statuses(&[status]).await
    }

    /// Comma separated statuses, e.g. `ASSIGNED,IN_PROGRESS`
    pub async fn by_statuses(&self, csv: &str) -> DomainResult<Vec<MaintenanceTask>> {
        let statuses = csv
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(MaintenanceStatus::parse)
            .collect::<DomainResult<Vec<_>>>()?;
        if statuses.is_empty() {
            return Err(DomainError::Validation("At least one status is required".into()));
        }
        self.repos.maintenance_tasks().find_by_statuses(&statuses).await
    }

    pub async fn by_priority(&self, priority: &str) -> DomainResult<Vec<MaintenanceTask>> {
        let priority = MaintenancePriority::parse(priority)?;
        self.repos.maintenance_tasks().find_by_priority(priority).await
    }

    pub async fn by_technician(&self, technician_id: i64) -> DomainResult<Vec<MaintenanceTask>> {
        self.repos.maintenance_tasks().find_by_technician(technician_id).await
    }

    pub async fn technician_stats(&self, technician_id: i64) -> DomainResult<TechnicianTaskStats> {
        let tasks = self.by_technician(technician_id).await?;
        Ok(TechnicianTaskStats::from_tasks(&tasks))
    }

    pub async fn overdue(&self) -> DomainResult<Vec<MaintenanceTask>> {
        let now = Utc::now();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|t| t.is_overdue(now))
            .collect())
    }

    async fn technician(&self, id: i64) -> DomainResult<Staff> {
        let staff = self
            .repos
            .staff()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Technician", "id", id))?;
        if staff.role != StaffRole::Technician {
            return Err(DomainError::Validation(format!(
                "Staff member is not a technician: {}",
                id
            )));
        }
        Ok(staff)
    }

    async fn send_assignment_email(&self, task: &MaintenanceTask, technician: &Staff) {
        if let Err(e) = self.mailer.send(assignment_email(task, technician)).await {
            warn!(task_id = %task.task_id, technician_id = technician.id, error = %e, "Failed to send task assignment email");
        }
    }

    /// Link a task to a registered equipment item; an unknown id is a bad request.
    async fn link_equipment(&self, task: &mut MaintenanceTask, equipment_id: i64) -> DomainResult<()> {
        let equipment = self
            .repos
            .equipment()
            .find_by_id(equipment_id)
            .await?
            .ok_or_else(|| DomainError::Validation(format!("Unknown equipment: {}", equipment_id)))?;
        task.equipment_id = Some(equipment.id);
        if task.equipment.is_none() {
            task.equipment = Some(equipment.name);
        }
        Ok(())
    }

    // ── Mutations ─────────────────────────────────────────────

    pub async fn create(&self, input: NewTask) -> DomainResult<MaintenanceTask> {
        let task_id = non_blank(input.task_id.as_deref())
            .ok_or_else(|| DomainError::Validation("Task ID is required".into()))?
            .to_string();
        let description = non_blank(input.description.as_deref())
            .ok_or_else(|| DomainError::Validation("Description is required".into()))?
            .to_string();
        let priority = non_blank(input.priority.as_deref())
            .ok_or_else(|| DomainError::Validation("Priority is required".into()))
            .and_then(MaintenancePriority::parse)?;
        let duration = match input.estimated_duration_minutes {
            Some(d) if d > 0 => d,
            _ => {
                return Err(DomainError::Validation(
                    "Estimated duration must be a positive number of minutes".into(),
                ))
            }
        };

        if self.repos.maintenance_tasks().exists(&task_id).await? {
            return Err(DomainError::Conflict(format!(
                "Task with ID {} already exists",
                task_id
            )));
        }

        let technician = match input.technician_id {
            Some(id) => Some(self.technician(id).await?),
            None => None,
        };

        let mut task = MaintenanceTask::new(task_id, description, priority, duration);
        task.equipment = non_blank(input.equipment.as_deref()).map(str::to_string);
        if let Some(equipment_id) = input.equipment_id {
            self.link_equipment(&mut task, equipment_id).await?;
        }
        task.due_date = input.due_date.as_deref().and_then(parse_datetime);
        task.required_skills = clean_list(input.required_skills.unwrap_or_default());
        task.required_parts = clean_list(input.required_parts.unwrap_or_default());
        if let Some(technician) = &technician {
            task.assign(technician.id, task.creation_date);
        }

        let task = self.repos.maintenance_tasks().create(task).await?;
        info!(task_id = %task.task_id, status = %task.status, "Maintenance task created");

        if let Some(technician) = technician {
            self.send_assignment_email(&task, &technician).await;
        }
        Ok(task)
    }

    pub async fn update(&self, task_id: &str, changes: TaskUpdate) -> DomainResult<MaintenanceTask> {
        let mut task = self.get(task_id).await?;

        if let Some(v) = non_blank(changes.description.as_deref()) {
            task.description = v.to_string();
        }
        if let Some(v) = non_blank(changes.priority.as_deref()) {
            task.priority = MaintenancePriority::parse(v)?;
        }
        if let Some(d) = changes.estimated_duration_minutes {
            if d <= 0 {
                return Err(DomainError::Validation(
                    "Estimated duration must be a positive number of minutes".into(),
                ));
            }
            task.estimated_duration_minutes = d;
        }
        if let Some(v) = changes.equipment {
            task.equipment = non_blank(Some(&v)).map(str::to_string);
        }
        if let Some(equipment_id) = changes.equipment_id {
            self.link_equipment(&mut task, equipment_id).await?;
        }
        if let Some(v) = changes.due_date.as_deref() {
            task.due_date = parse_datetime(v);
        }
        if let Some(skills) = changes.required_skills {
            task.required_skills = clean_list(skills);
        }
        if let Some(parts) = changes.required_parts {
            task.required_parts = clean_list(parts);
        }
        task.last_updated = Utc::now();

        self.repos.maintenance_tasks().update(task).await
    }

    pub async fn delete(&self, task_id: &str) -> DomainResult<()> {
        self.repos.maintenance_tasks().delete(task_id).await?;
        info!(task_id, "Maintenance task deleted");
        Ok(())
    }

    pub async fn update_status(&self, task_id: &str, status: &str) -> DomainResult<MaintenanceTask> {
        let status = MaintenanceStatus::parse(status)?;
        let mut task = self.get(task_id).await?;
        let old_status = task.status;
        task.set_status(status, Utc::now());
        let task = self.repos.maintenance_tasks().update(task).await?;

        info!(task_id, from = %old_status, to = %status, "Maintenance task status changed");
        self.announce_transition(&task, old_status).await;
        Ok(task)
    }

    /// Admin notices for technician-driven transitions
    async fn announce_transition(&self, task: &MaintenanceTask, old_status: MaintenanceStatus) {
        let Some(technician_id) = task.assigned_technician_id else {
            return;
        };
        let Some(notice) = TaskNotice::for_transition(old_status, task.status) else {
            debug!(task_id = %task.task_id, "No admin notice for this transition");
            return;
        };

        let technician_name = match self.repos.staff().find_by_id(technician_id).await {
            Ok(Some(staff)) => staff.full_name(),
            Ok(None) => format!("#{}", technician_id),
            Err(e) => {
                warn!(technician_id, error = %e, "Could not load technician for notice");
                format!("#{}", technician_id)
            }
        };

        let priority = match notice {
            TaskNotice::Rejected => "HIGH",
            _ => "NORMAL",
        };
        let sent = self
            .notifications
            .notify_admins(
                &notice_message(notice, task, &technician_name),
                &format!("TASK_{}", notice.as_str()),
                priority,
            )
            .await;
        info!(task_id = %task.task_id, notice = notice.as_str(), admins = sent, "Task notice sent");

        self.event_bus
            .publish(Event::TaskStatusChanged(TaskStatusChangedEvent {
                task_id: task.task_id.clone(),
                old_status: old_status.to_string(),
                new_status: task.status.to_string(),
                technician_id: Some(technician_id),
                notice: notice.as_str().to_string(),
            }));
    }

    /// Assign with `Some(id)`, unassign with `None`
    pub async fn set_technician(
        &self,
        task_id: &str,
        technician_id: Option<i64>,
    ) -> DomainResult<MaintenanceTask> {
        let mut task = self.get(task_id).await?;
        let now = Utc::now();

        match technician_id {
            Some(id) => {
                let technician = self.technician(id).await?;
                task.assign(technician.id, now);
                let task = self.repos.maintenance_tasks().update(task).await?;
                info!(task_id, technician_id = id, "Technician assigned to task");
                self.send_assignment_email(&task, &technician).await;
                Ok(task)
            }
            None => {
                task.unassign(now);
                let task = self.repos.maintenance_tasks().update(task).await?;
                info!(task_id, "Technician unassigned from task");
                Ok(task)
            }
        }
    }

    pub async fn update_completion(
        &self,
        task_id: &str,
        percentage: i32,
    ) -> DomainResult<MaintenanceTask> {
        if !(0..=100).contains(&percentage) {
            return Err(DomainError::Validation(
                "Completion percentage must be between 0 and 100".into(),
            ));
        }
        let mut task = self.get(task_id).await?;
        let old_status = task.status;
        let now = Utc::now();

        task.completion_percentage = percentage;
        task.last_updated = now;
        if percentage == 100 && task.status != MaintenanceStatus::Completed {
            task.set_status(MaintenanceStatus::Completed, now);
        }
        let task = self.repos.maintenance_tasks().update(task).await?;

        if task.status != old_status {
            self.announce_transition(&task, old_status).await;
        }
        Ok(task)
    }

    pub async fn add_skill(&self, task_id: &str, skill: &str) -> DomainResult<MaintenanceTask> {
        if skill.trim().is_empty() {
            return Err(DomainError::Validation("Skill cannot be empty".into()));
        }
        let mut task = self.get(task_id).await?;
        if !MaintenanceTask::add_unique(&mut task.required_skills, skill) {
            return Ok(task);
        }
        task.last_updated = Utc::now();
        self.repos.maintenance_tasks().update(task).await
    }

    pub async fn add_part(&self, task_id: &str, part: &str) -> DomainResult<MaintenanceTask> {
        if part.trim().is_empty() {
            return Err(DomainError::Validation("Part cannot be empty".into()));
        }
        let mut task = self.get(task_id).await?;
        if !MaintenanceTask::add_unique(&mut task.required_parts, part) {
            return Ok(task);
        }
        task.last_updated = Utc::now();
        self.repos.maintenance_tasks().update(task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::config::MailConfig;
    use crate::domain::equipment::Equipment;
    use crate::infrastructure::mail::LogMailer;
    use crate::test_support::{repositories, seed_staff};
    use chrono::Duration;

    struct Fixture {
        svc: MaintenanceService,
        repos: Arc<dyn RepositoryProvider>,
        bus: SharedEventBus,
    }

    async fn fixture() -> Fixture {
        let repos = repositories().await;
        let bus = Arc::new(EventBus::new());
        let notifications = Arc::new(NotificationService::new(repos.clone(), bus.clone()));
        let mailer = Arc::new(LogMailer::new(&MailConfig::default()));
        Fixture {
            svc: MaintenanceService::new(repos.clone(), notifications, mailer, bus.clone()),
            repos,
            bus,
        }
    }

    fn new_task(id: &str) -> NewTask {
        NewTask {
            task_id: Some(id.into()),
            description: Some("Replace brake pads".into()),
            priority: Some("high".into()),
            estimated_duration_minutes: Some(90),
            required_skills: Some(vec![" brakes ".into(), "brakes".into(), "".into()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_validates_and_rejects_duplicates() {
        let f = fixture().await;

        let mut missing = new_task("T-1");
        missing.description = None;
        assert!(matches!(f.svc.create(missing).await, Err(DomainError::Validation(_))));

        let mut bad_priority = new_task("T-1");
        bad_priority.priority = Some("URGENT".into());
        assert!(matches!(f.svc.create(bad_priority).await, Err(DomainError::Validation(_))));

        let task = f.svc.create(new_task("T-1")).await.unwrap();
        assert_eq!(task.status, MaintenanceStatus::Planned);
        assert_eq!(task.completion_percentage, 0);
        assert_eq!(task.required_skills, vec!["brakes"]);

        assert!(matches!(f.svc.create(new_task("T-1")).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn tasks_link_to_registered_equipment() {
        let f = fixture().await;
        let lift = f
            .repos
            .equipment()
            .create(Equipment::new("Bus lift 2"))
            .await
            .unwrap();

        let mut unknown = new_task("T-7");
        unknown.equipment_id = Some(999);
        assert!(matches!(f.svc.create(unknown).await, Err(DomainError::Validation(_))));

        let mut linked = new_task("T-7");
        linked.equipment_id = Some(lift.id);
        let task = f.svc.create(linked).await.unwrap();
        assert_eq!(task.equipment_id, Some(lift.id));
        assert_eq!(task.equipment.as_deref(), Some("Bus lift 2"));

        let relabelled = f
            .svc
            .update(
                "T-7",
                TaskUpdate { equipment: Some("Lift bay 2".into()), ..Default::default() },
            )
            .await
            .unwrap();
        assert_eq!(relabelled.equipment_id, Some(lift.id));
        assert_eq!(relabelled.equipment.as_deref(), Some("Lift bay 2"));

        let stored = f.repos.maintenance_tasks().find_by_equipment(lift.id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn create_with_technician_is_assigned() {
        let f = fixture().await;
        let tech = seed_staff(f.repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;

        let mut input = new_task("T-2");
        input.technician_id = Some(tech.id);
        let task = f.svc.create(input).await.unwrap();
        assert_eq!(task.status, MaintenanceStatus::Assigned);
        assert_eq!(task.assigned_technician_id, Some(tech.id));

        let stats = f.svc.technician_stats(tech.id).await.unwrap();
        assert_eq!(stats.total_tasks, 1);
        assert_eq!(stats.assigned_tasks, 1);
    }

    #[tokio::test]
    async fn accepting_a_task_notifies_every_admin() {
        let f = fixture().await;
        let tech = seed_staff(f.repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;
        let admin_a = seed_staff(f.repos.as_ref(), "a@imas.cd", StaffRole::Admin).await;
        let admin_b = seed_staff(f.repos.as_ref(), "b@imas.cd", StaffRole::Admin).await;
        let mut sub = f.bus.subscribe();

        f.svc.create(new_task("T-3")).await.unwrap();
        f.svc.set_technician("T-3", Some(tech.id)).await.unwrap();
        let task = f.svc.update_status("T-3", "in_progress").await.unwrap();
        assert_eq!(task.status, MaintenanceStatus::InProgress);

        for admin in [admin_a.id, admin_b.id] {
            let inbox = f.repos.notifications().find_by_recipient(admin).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].notification_type, "TASK_ACCEPTED");
        }

        let mut saw_event = false;
        while let Ok(Some(msg)) =
            tokio::time::timeout(std::time::Duration::from_millis(100), sub.recv()).await
        {
            if let Event::TaskStatusChanged(e) = msg.event {
                assert_eq!(e.notice, "ACCEPTED");
                saw_event = true;
            }
        }
        assert!(saw_event);
    }

    #[tokio::test]
    async fn unassigned_tasks_send_no_notice() {
        let f = fixture().await;
        let admin = seed_staff(f.repos.as_ref(), "a@imas.cd", StaffRole::Admin).await;
        f.svc.create(new_task("T-4")).await.unwrap();
        f.svc.update_status("T-4", "IN_PROGRESS").await.unwrap();
        let done = f.svc.update_status("T-4", "COMPLETED").await.unwrap();
        assert_eq!(done.completion_percentage, 100);
        assert!(done.completion_date.is_some());
        assert!(f.repos.notifications().find_by_recipient(admin.id).await.unwrap().is_empty());
        assert!(matches!(
            f.svc.update_status("T-4", "FINISHED").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn technician_assignment_rules() {
        let f = fixture().await;
        let driver = seed_staff(f.repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let tech = seed_staff(f.repos.as_ref(), "tech@imas.cd", StaffRole::Technician).await;
        f.svc.create(new_task("T-5")).await.unwrap();

        assert!(matches!(
            f.svc.set_technician("T-5", Some(driver.id)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.svc.set_technician("T-5", Some(4242)).await,
            Err(DomainError::NotFound { .. })
        ));

        let assigned = f.svc.set_technician("T-5", Some(tech.id)).await.unwrap();
        assert_eq!(assigned.status, MaintenanceStatus::Assigned);
        let released = f.svc.set_technician("T-5", None).await.unwrap();
        assert_eq!(released.status, MaintenanceStatus::Planned);
        assert_eq!(released.assigned_technician_id, None);
    }

    #[tokio::test]
    async fn completion_bounds_and_auto_complete() {
        let f = fixture().await;
        f.svc.create(new_task("T-6")).await.unwrap();

        assert!(matches!(
            f.svc.update_completion("T-6", 101).await,
            Err(DomainError::Validation(_))
        ));
        let half = f.svc.update_completion("T-6", 50).await.unwrap();
        assert_eq!(half.status, MaintenanceStatus::Planned);
        let full = f.svc.update_completion("T-6", 100).await.unwrap();
        assert_eq!(full.status, MaintenanceStatus::Completed);
    }

    #[tokio::test]
    async fn skills_parts_and_queries() {
        let f = fixture().await;
        let mut input = new_task("T-7");
        input.due_date = Some((Utc::now() - Duration::days(2)).to_rfc3339());
        f.svc.create(input).await.unwrap();
        f.svc.create(new_task("T-8")).await.unwrap();

        assert!(matches!(f.svc.add_skill("T-7", "  ").await, Err(DomainError::Validation(_))));
        let task = f.svc.add_skill("T-7", " welding ").await.unwrap();
        assert_eq!(task.required_skills, vec!["brakes", "welding"]);
        let task = f.svc.add_part("T-7", "brake pad").await.unwrap();
        let task = f.svc.add_part(&task.task_id, "brake pad").await.unwrap();
        assert_eq!(task.required_parts, vec!["brake pad"]);

        let overdue = f.svc.overdue().await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].task_id, "T-7");

        assert_eq!(f.svc.by_priority("HIGH").await.unwrap().len(), 2);
        assert_eq!(f.svc.by_statuses("PLANNED, ASSIGNED").await.unwrap().len(), 2);
        assert!(f.svc.by_status("nope").await.is_err());

        f.svc.delete("T-8").await.unwrap();
        assert!(matches!(f.svc.delete("T-8").await, Err(DomainError::NotFound { .. })));
    }
}
