pub mod kanban_status;
pub mod kanban_type;
