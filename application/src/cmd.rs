//! Handlers of the client [`Command`]s.
//!
//! [`Command`]: args::Command

use common::pagination::{Arguments, Order};
use secrecy::SecretBox;
use service::{
    board::Board,
    command::{
        add_team_members::NewMember,
        create_task::Contents,
        update_project::Changes as ProjectChanges,
        update_task::Changes as TaskChanges,
        verify_otp::Otp,
        AddTeamMembers, ArchiveProject, CreateProject, CreateSession,
        CreateTask, DestroySession, RemoveTeamMember, ResetPassword,
        SendOtp, UpdateProject, UpdateTask, VerifyOtp,
    },
    domain::{project, task, team, user, Task},
    query,
    read,
    Command as _, Query as _,
};
use tracing as log;

use crate::{args, Service};

/// Runs the provided [`args::Command`] against the [`Service`].
///
/// # Errors
///
/// Errors if the [`args::Command`] fails; the cause is logged.
pub async fn run(
    service: &Service,
    command: args::Command,
) -> Result<(), ()> {
    use args::Command as Cmd;

    match command {
        Cmd::Login { email, password } => login(service, email, password).await,
        Cmd::Logout => logout(service).await,
        Cmd::Whoami => whoami(service),
        Cmd::Projects {
            all,
            name,
            status,
            page,
            sort_by,
            descending,
        } => projects(service, all, name, status, page, sort_by, descending)
            .await,
        Cmd::Project { id } => project(service, id).await,
        Cmd::CreateProject {
            name,
            description,
            start_date,
            end_date,
            status,
        } => {
            create_project(
                service, name, description, start_date, end_date, status,
            )
            .await
        }
        Cmd::UpdateProject {
            id,
            name,
            description,
            end_date,
            status,
        } => {
            update_project(service, id, name, description, end_date, status)
                .await
        }
        Cmd::Archive { id } => archive(service, id).await,
        Cmd::CreateTask {
            project,
            title,
            description,
            start_date,
            due_date,
            priority,
            assignee,
        } => {
            create_task(
                service, project, title, description, start_date, due_date,
                priority, assignee,
            )
            .await
        }
        Cmd::UpdateTask {
            task,
            project,
            title,
            description,
            due_date,
            priority,
            assignee,
        } => {
            update_task(
                service, task, project, title, description, due_date,
                priority, assignee,
            )
            .await
        }
        Cmd::Board { project, member } => board(service, project, member).await,
        Cmd::Move {
            project,
            task,
            status,
        } => move_task(service, project, task, status).await,
        Cmd::Tasks { project, page } => tasks(service, project, page).await,
        Cmd::Team {
            project,
            workload,
            page,
        } => team(service, project, workload, page).await,
        Cmd::TeamAdd {
            project,
            user,
            specialization,
        } => team_add(service, project, user, specialization).await,
        Cmd::TeamRemove { member } => team_remove(service, member).await,
        Cmd::Recover(step) => recover(service, step).await,
    }
}

/// Handles [`args::Command::Login`].
async fn login(
    service: &Service,
    email: user::Email,
    password: user::Password,
) -> Result<(), ()> {
    let user = service
        .execute(CreateSession {
            email,
            password: SecretBox::new(Box::new(password)),
        })
        .await
        .map_err(|e| log::error!("login failed: {e}"))?;

    println!("logged in as {} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

/// Handles [`args::Command::Logout`].
async fn logout(service: &Service) -> Result<(), ()> {
    _ = service.execute(DestroySession).await;

    println!("logged out");
    Ok(())
}

/// Handles [`args::Command::Whoami`].
fn whoami(service: &Service) -> Result<(), ()> {
    if !service.is_authenticated() {
        println!("no active session");
        return Ok(());
    }
    let Some(user) = service.session_user() else {
        println!("no active session");
        return Ok(());
    };

    println!("{} <{}> ({})", user.name, user.email, user.role);
    for p in &user.permissions {
        println!(
            "  {}: view={} create={} update={} delete={}",
            p.module, p.can_view, p.can_create, p.can_update, p.can_delete,
        );
    }
    Ok(())
}

/// Handles [`args::Command::Projects`].
async fn projects(
    service: &Service,
    all: bool,
    name: Option<project::Name>,
    status: Option<project::Status>,
    page: u32,
    sort_by: Option<String>,
    descending: bool,
) -> Result<(), ()> {
    let page = service
        .execute(query::projects::List {
            scope: if all {
                query::projects::Scope::All
            } else {
                query::projects::Scope::Mine
            },
            selector: read::project::list::Selector {
                arguments: Arguments::at(page),
                filter: read::project::list::Filter {
                    name,
                    status,
                    sort_by,
                    order: descending.then_some(Order::Descending),
                },
            },
        })
        .await
        .map_err(|e| log::error!("failed to list projects: {e}"))?;

    if page.is_empty() {
        println!("no projects");
        return Ok(());
    }
    for p in &page.content {
        println!(
            "#{} {} [{}] {} tasks, {} members{}",
            p.id,
            p.name,
            p.status,
            p.tasks_count,
            p.team_members_count,
            if p.archived { " (archived)" } else { "" },
        );
    }
    println!("{}", footer(page.page, page.total_pages, page.total_elements));
    Ok(())
}

/// Handles [`args::Command::Project`].
async fn project(service: &Service, id: project::Id) -> Result<(), ()> {
    let detail = service
        .execute(query::project::Detail(id))
        .await
        .map_err(|e| log::error!("failed to fetch project {id}: {e}"))?;

    println!("#{} {} [{}]", detail.id, detail.name, detail.status);
    println!("{}", detail.description);
    match detail.end_date {
        Some(end) => println!("{} .. {end}", detail.start_date),
        None => println!("{} ..", detail.start_date),
    }
    println!("team:");
    for m in &detail.team_members {
        println!("  #{} {} <{}> - {}", m.id, m.name, m.email, m.specialization);
    }
    Ok(())
}

/// Handles [`args::Command::CreateProject`].
async fn create_project(
    service: &Service,
    name: project::Name,
    description: String,
    start_date: time::Date,
    end_date: Option<time::Date>,
    status: Option<project::Status>,
) -> Result<(), ()> {
    let created = service
        .execute(CreateProject {
            name,
            description: description.into(),
            start_date,
            end_date,
            status,
        })
        .await
        .map_err(|e| log::error!("failed to create the project: {e}"))?;

    println!("created project #{} {}", created.id, created.name);
    Ok(())
}

/// Handles [`args::Command::UpdateProject`].
async fn update_project(
    service: &Service,
    id: project::Id,
    name: Option<project::Name>,
    description: Option<String>,
    end_date: Option<time::Date>,
    status: Option<project::Status>,
) -> Result<(), ()> {
    let updated = service
        .execute(UpdateProject {
            id,
            changes: ProjectChanges {
                name,
                description: description.map(Into::into),
                start_date: None,
                end_date,
                status,
            },
        })
        .await
        .map_err(|e| log::error!("failed to update project {id}: {e}"))?;

    println!("updated project #{} {}", updated.id, updated.name);
    Ok(())
}

/// Handles [`args::Command::Archive`].
async fn archive(service: &Service, id: project::Id) -> Result<(), ()> {
    service
        .execute(ArchiveProject(id))
        .await
        .map_err(|e| log::error!("failed to archive project {id}: {e}"))?;

    println!("project {id} archived");
    Ok(())
}

/// Handles [`args::Command::CreateTask`].
#[expect(clippy::too_many_arguments, reason = "plain CLI surface")]
async fn create_task(
    service: &Service,
    project: project::Id,
    title: task::Title,
    description: String,
    start_date: time::Date,
    due_date: time::Date,
    priority: task::Priority,
    assignee: Option<user::Id>,
) -> Result<(), ()> {
    let created = service
        .execute(CreateTask {
            project,
            contents: Contents {
                title,
                description: description.into(),
                start_date,
                due_date,
                priority,
                assignee,
            },
        })
        .await
        .map_err(|e| log::error!("failed to create the task: {e}"))?;

    println!("created task #{} {}", created.id, created.title);
    Ok(())
}

/// Handles [`args::Command::UpdateTask`].
#[expect(clippy::too_many_arguments, reason = "plain CLI surface")]
async fn update_task(
    service: &Service,
    task: task::Id,
    project: project::Id,
    title: Option<task::Title>,
    description: Option<String>,
    due_date: Option<time::Date>,
    priority: Option<task::Priority>,
    assignee: Option<user::Id>,
) -> Result<(), ()> {
    service
        .execute(UpdateTask {
            task,
            project,
            changes: TaskChanges {
                title,
                description: description.map(Into::into),
                start_date: None,
                due_date,
                priority,
                assignee,
            },
        })
        .await
        .map_err(|e| log::error!("failed to update task {task}: {e}"))?;

    println!("task {task} updated");
    Ok(())
}

/// Handles [`args::Command::TeamAdd`].
async fn team_add(
    service: &Service,
    project: project::Id,
    user: user::Id,
    specialization: team::specialization::Id,
) -> Result<(), ()> {
    service
        .execute(AddTeamMembers {
            project,
            members: vec![NewMember {
                user,
                specialization,
            }],
        })
        .await
        .map_err(|e| log::error!("failed to assign the member: {e}"))?;

    println!("user {user} assigned into project {project}");
    Ok(())
}

/// Handles [`args::Command::TeamRemove`].
async fn team_remove(service: &Service, member: team::Id) -> Result<(), ()> {
    service
        .execute(RemoveTeamMember(member))
        .await
        .map_err(|e| log::error!("failed to remove member {member}: {e}"))?;

    println!("member {member} removed");
    Ok(())
}

/// Handles [`args::Command::Board`].
async fn board(
    service: &Service,
    project: project::Id,
    member: Option<user::Id>,
) -> Result<(), ()> {
    if let Some(member) = member {
        let tasks = service
            .execute(query::tasks::ForMember { project, member })
            .await
            .map_err(|e| {
                log::error!("failed to fetch the member's board: {e}");
            })?;
        print_columns(&tasks);
        return Ok(());
    }

    let mut board = Board::new(project);
    board
        .load(service)
        .await
        .map_err(|e| log::error!("failed to load the board: {e}"))?;
    print_columns(board.tasks());
    Ok(())
}

/// Handles [`args::Command::Move`].
async fn move_task(
    service: &Service,
    project: project::Id,
    task: task::Id,
    status: task::Status,
) -> Result<(), ()> {
    let mut board = Board::new(project);
    board
        .load(service)
        .await
        .map_err(|e| log::error!("failed to load the board: {e}"))?;
    board
        .move_task(service, task, status)
        .await
        .map_err(|e| log::error!("failed to move task {task}: {e}"))?;

    println!("task {task} moved to {status}");
    Ok(())
}

/// Handles [`args::Command::Tasks`].
async fn tasks(
    service: &Service,
    project: project::Id,
    page: u32,
) -> Result<(), ()> {
    let page = service
        .execute(query::tasks::ListForProject {
            project,
            arguments: Arguments::at(page),
        })
        .await
        .map_err(|e| log::error!("failed to list tasks: {e}"))?;

    if page.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for t in &page.content {
        println!(
            "#{} {} [{}] [{}] due {}{}",
            t.id,
            t.title,
            t.status,
            t.priority,
            t.due_date,
            t.assigned_to
                .as_ref()
                .map(|n| format!(" - {n}"))
                .unwrap_or_default(),
        );
    }
    println!("{}", footer(page.page, page.total_pages, page.total_elements));
    Ok(())
}

/// Handles [`args::Command::Team`].
async fn team(
    service: &Service,
    project: project::Id,
    workload: bool,
    page: u32,
) -> Result<(), ()> {
    let arguments = Arguments::at(page);

    if workload {
        let page = service
            .execute(query::team::WithWorkload { project, arguments })
            .await
            .map_err(|e| log::error!("failed to list the team: {e}"))?;
        for m in &page.content {
            println!(
                "#{} {} <{}> - {} ({} open tasks)",
                m.member.id,
                m.member.name,
                m.member.email,
                m.member.specialization,
                m.workload,
            );
        }
        println!(
            "{}",
            footer(page.page, page.total_pages, page.total_elements),
        );
        return Ok(());
    }

    let page = service
        .execute(query::team::Members { project, arguments })
        .await
        .map_err(|e| log::error!("failed to list the team: {e}"))?;
    for m in &page.content {
        println!("#{} {} <{}> - {}", m.id, m.name, m.email, m.specialization);
    }
    println!("{}", footer(page.page, page.total_pages, page.total_elements));
    Ok(())
}

/// Handles [`args::Recover`] steps.
async fn recover(service: &Service, step: args::Recover) -> Result<(), ()> {
    use args::Recover as Step;

    match step {
        Step::Send { email } => {
            service
                .execute(SendOtp { email })
                .await
                .map_err(|e| log::error!("failed to send the OTP: {e}"))?;
            println!("OTP sent, verify it with `recover verify`");
        }
        Step::Verify { email, otp } => {
            verify(service, email, otp).await?;
            println!("OTP verified, set a new password with `recover reset`");
        }
        Step::Reset { new_password } => {
            service
                .execute(ResetPassword {
                    new_password: SecretBox::new(Box::new(new_password)),
                })
                .await
                .map_err(|e| {
                    log::error!("failed to reset the password: {e}");
                })?;
            println!("password reset, log in with the new password");
        }
    }
    Ok(())
}

/// Runs the OTP verification step.
async fn verify(
    service: &Service,
    email: user::Email,
    otp: Otp,
) -> Result<(), ()> {
    service
        .execute(VerifyOtp { email, otp })
        .await
        .map_err(|e| log::error!("failed to verify the OTP: {e}"))
}

/// Prints the provided [`Task`]s as status columns.
fn print_columns(tasks: &[Task]) {
    for status in task::Status::ALL {
        let column: Vec<_> =
            tasks.iter().filter(|t| t.status == status).collect();
        println!("{status} ({})", column.len());
        for t in column {
            println!("  #{} {} [{}] due {}", t.id, t.title, t.priority, t.due_date);
        }
    }
}

/// Renders the pagination footer of a listing.
fn footer(page: u32, total_pages: u32, total_elements: u64) -> String {
    format!("page {}/{total_pages} ({total_elements} total)", page + 1)
}
