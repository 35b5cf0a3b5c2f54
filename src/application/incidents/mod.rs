pub mod service;

pub use service::{
    assignment_email_body, compute_stats, Assignment, IncidentReport, IncidentService,
    IncidentStats, IncidentUpdate, NewIncident, StatsFilter, TechnicianAssignment,
};
