use anyhow::{Context, bail};
use chrono::NaiveDate;
use tracing::info;
use tracing_appender::rolling;

use ems_client::api::auth::RegisterProfile;
use ems_client::api::reports::{self, AuditFilter};
use ems_client::api::ApiClient;
use ems_client::assistant::AssistantConduit;
use ems_client::attendance::AttendanceTracker;
use ems_client::auth::access::can_access;
use ems_client::auth::session::SessionStore;
use ems_client::config::Config;
use ems_client::leave::LeaveManager;
use ems_client::location;
use ems_client::model::attendance::AttendanceStatus;
use ems_client::model::chat::{ChatMessage, ChatRole};
use ems_client::model::leave_request::{LeaveType, NewLeaveRequest};
use ems_client::model::user::{ProfileUpdate, Role};
use ems_client::store::FileStore;

const USAGE: &str = "usage: ems <command>
  login <email> <admin|employee>
  register <name> <email> [admin|employee]
  logout
  whoami
  profile name|department <value>
  status
  checkin
  checkout
  history
  leave list
  leave request <sick|vacation|personal> <start> <end> <reason...>
  leave cancel <id>
  salary
  audit [search]
  ask <question...>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!("Client starting");

    let api = ApiClient::new(config.api_base_url.clone());
    let mut session = SessionStore::new(api.clone(), Box::new(FileStore::new(&config.data_dir)?));
    let mut tracker = AttendanceTracker::new(
        api.clone(),
        Box::new(FileStore::new(&config.data_dir)?),
        config.auto_checkout_hours,
    );

    // Startup sweep: close any stale session left over from a previous run.
    if let Some(notice) = tracker.sweep() {
        println!("{notice}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        println!("{USAGE}");
        return Ok(());
    };

    match command {
        "login" => {
            let [_, email, role] = args.as_slice() else {
                bail!("usage: ems login <email> <admin|employee>");
            };
            let role: Role = role.parse().context("role must be admin or employee")?;
            let identity = session.login(email, role).await;
            println!("Logged in as {} ({})", identity.name, identity.role);
        }
        "register" => {
            let (name, email, role) = match args.as_slice() {
                [_, name, email] => (name.clone(), email.clone(), None),
                [_, name, email, role] => (
                    name.clone(),
                    email.clone(),
                    Some(role.parse::<Role>().context("role must be admin or employee")?),
                ),
                _ => bail!("usage: ems register <name> <email> [admin|employee]"),
            };
            session
                .register(RegisterProfile {
                    name: Some(name),
                    email: Some(email),
                    role,
                    ..Default::default()
                })
                .await;
            let identity = session.current().expect("registration always authenticates");
            println!("Registered and logged in as {}", identity.name);
        }
        "logout" => {
            session.logout().await;
            println!("Logged out.");
        }
        "whoami" => match session.current() {
            Some(identity) => println!(
                "{} <{}> | {} / {} (level {}, {} xp)",
                identity.name,
                identity.email,
                identity.role,
                identity.department,
                identity.level,
                identity.xp
            ),
            None => println!("No active session."),
        },
        "profile" => {
            let [_, field, value] = args.as_slice() else {
                bail!("usage: ems profile name|department <value>");
            };
            let update = match field.as_str() {
                "name" => ProfileUpdate {
                    name: Some(value.clone()),
                    ..Default::default()
                },
                "department" => ProfileUpdate {
                    department: Some(value.clone()),
                    ..Default::default()
                },
                other => bail!("unknown profile field: {other}"),
            };
            if session.update_profile(update).await {
                println!("Profile updated.");
            } else {
                println!("No active session. Log in first.");
            }
        }
        "status" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            let (stats, trends) = reports::dashboard(&api, session.token()).await;
            println!(
                "Employees: {}   Attendance: {}   On leave: {}   Payroll: {}",
                stats.total_employees, stats.attendance_rate, stats.on_leave, stats.payroll
            );
            for point in trends {
                println!("  {:<4} present {:>3}  late {:>2}", point.name, point.present, point.late);
            }
            match tracker.status() {
                AttendanceStatus::CheckedIn { since } => {
                    println!("You are checked in since {}.", since.format("%H:%M"))
                }
                AttendanceStatus::CheckedOut => println!("You are checked out."),
            }
        }
        "checkin" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            let provider = location::from_config(config.fixed_location.as_deref());
            let location = match provider.current_position() {
                Ok(coords) => Some(coords.display()),
                Err(e) => {
                    // Non-blocking: check-in proceeds without a location.
                    println!("{e}");
                    None
                }
            };
            tracker.check_in(location.clone(), session.token()).await;
            match location {
                Some(loc) => println!("Checked in at {loc}."),
                None => println!("Checked in."),
            }
        }
        "checkout" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            match tracker.check_out(session.token()).await {
                Some(entry) => println!("Checked out at {} (in at {}).", entry.check_out, entry.check_in),
                None => println!("You are not checked in."),
            }
        }
        "history" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            for entry in tracker.history(session.token()).await {
                println!(
                    "{}  in {:>8}  out {:>13}  {:<7} [{}]",
                    entry.date, entry.check_in, entry.check_out, entry.outcome, entry.method
                );
            }
        }
        "leave" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            let manager = LeaveManager::new(api.clone());
            match args.get(1).map(String::as_str) {
                None | Some("list") => print_leaves(&manager.list(session.token()).await),
                Some("request") => {
                    let [_, _, leave_type, start, end, reason @ ..] = args.as_slice() else {
                        bail!("usage: ems leave request <type> <start> <end> <reason...>");
                    };
                    let request = NewLeaveRequest {
                        leave_type: leave_type
                            .parse::<LeaveType>()
                            .context("leave type must be sick, vacation or personal")?,
                        start_date: parse_date(start)?,
                        end_date: parse_date(end)?,
                        reason: reason.join(" "),
                    };
                    // Surfaced-failure path: a refused submission is an error,
                    // not a silent fallback.
                    match manager.submit(&request, session.token()).await {
                        Ok(requests) => {
                            println!("Leave request submitted.");
                            print_leaves(&requests);
                        }
                        Err(e) => println!("Failed to submit leave request: {e}"),
                    }
                }
                Some("cancel") => {
                    let [_, _, id] = args.as_slice() else {
                        bail!("usage: ems leave cancel <id>");
                    };
                    match manager.cancel(id, session.token()).await {
                        Ok(()) => println!("Leave request {id} cancelled."),
                        Err(e) => println!("Failed to cancel leave request: {e}"),
                    }
                }
                Some(other) => bail!("unknown leave subcommand: {other}"),
            }
        }
        "salary" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            let (history, breakdown) = reports::salary(&api, session.token()).await;
            for month in history {
                println!("  {:<4} net {:>6}  bonus {:>5}", month.month, month.net, month.bonus);
            }
            println!(
                "Breakdown: base {} + hra {} + allowance {} - tax {} - pf {} = net {}",
                breakdown.base,
                breakdown.hra,
                breakdown.allowance,
                breakdown.tax,
                breakdown.pf,
                breakdown.net
            );
        }
        "audit" => {
            if !require_view(&session, Some(&[Role::Admin])) {
                return Ok(());
            }
            let filter = AuditFilter {
                search: args.get(1).cloned(),
            };
            for log in reports::audit_logs(&api, &filter, session.token()).await {
                println!(
                    "{}  {:<12} {:<16} {}  ({})",
                    log.id,
                    log.user_name,
                    log.action,
                    log.timestamp.format("%Y-%m-%d %H:%M"),
                    log.details
                );
            }
        }
        "ask" => {
            if !require_view(&session, None) {
                return Ok(());
            }
            if args.len() < 2 {
                bail!("usage: ems ask <question...>");
            }
            let conduit = AssistantConduit::new(config.gemini_api_key.clone(), &config.gemini_model);
            let context = session
                .current()
                .map(AssistantConduit::context_for)
                .unwrap_or_default();

            // The transcript is client-local and append-only; the conduit
            // itself is stateless across calls.
            let mut transcript = vec![ChatMessage::user(args[1..].join(" "))];
            let reply = conduit.ask(&transcript[0].text, &context).await;
            transcript.push(ChatMessage::assistant(reply));
            for msg in &transcript {
                let speaker = match msg.role {
                    ChatRole::User => "you",
                    ChatRole::Assistant => "assistant",
                };
                println!("{speaker}: {}", msg.text);
            }
        }
        _ => println!("{USAGE}"),
    }

    Ok(())
}

/// The CLI's navigation gate. Mirrors the dashboard's redirects: no session
/// sends the user to login, a role mismatch back to the default view.
fn require_view(session: &SessionStore, roles: Option<&[Role]>) -> bool {
    if can_access(session.current(), roles) {
        return true;
    }
    if session.is_authenticated() {
        println!("Access denied.");
    } else {
        println!("No active session. Log in first.");
    }
    false
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    raw.parse()
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn print_leaves(requests: &[ems_client::model::leave_request::LeaveRequest]) {
    for req in requests {
        println!(
            "#{}  {:<8} {} to {}  {:<8} \"{}\"",
            req.id, req.leave_type, req.start_date, req.end_date, req.status, req.reason
        );
    }
    if requests.is_empty() {
        println!("No leave requests found.");
    }
}
