//! Resource paths of the remote backend.

/// Login endpoint.
pub const LOGIN: &str = "api/auth/login";

/// Access token refresh endpoint.
pub const REFRESH_TOKEN: &str = "api/auth/refresh-token";

/// Logout notification endpoint.
pub const LOGOUT: &str = "api/auth/logout";

/// OTP sending endpoint of the password-recovery flow.
pub const SEND_OTP: &str = "api/auth/send-otp";

/// OTP verification endpoint of the password-recovery flow.
pub const VERIFY_OTP: &str = "api/auth/verify-otp";

/// Password reset endpoint of the password-recovery flow.
pub const RESET_PASSWORD: &str = "api/auth/reset-password";

/// Projects collection endpoint.
pub const PROJECTS: &str = "api/projects";

/// Projects of the current user.
pub const MY_PROJECTS: &str = "api/projects/my-projects";

/// Dropdown listing of the current user's projects.
pub const MY_PROJECTS_DROPDOWN: &str = "api/projects/my-projects/dropdown";

/// Dropdown listing of the managed projects.
pub const PM_PROJECTS_DROPDOWN: &str = "api/projects/dropdown";

/// Tasks of a project (suffixed with the project ID).
pub const PROJECT_TASKS: &str = "api/tasks/projects";

/// Task status update endpoint (suffixed with the task ID).
pub const TASKS: &str = "api/tasks";

/// Tasks due soon for the current user.
pub const UPCOMING_DUE_TASKS: &str = "api/tasks/upcoming-due";

/// Recent task history of the current user.
pub const TASK_HISTORY: &str = "api/tasks/history";

/// Team members of the current user.
pub const MY_TEAM_MEMBERS: &str = "api/teams/my-team";

/// Teams of a project (suffixed with the project ID).
pub const PROJECT_TEAMS: &str = "api/teams/projects";

/// Members selectable for assignment into a project team.
pub const SELECT_MEMBERS: &str = "api/teams/selectable-members";

/// Specializations lookup endpoint.
pub const SPECIALIZATIONS: &str = "api/specializations";
