//! Creates tenants and users directly in the configured database.
//!
//! ```text
//! provision tenant <company name>
//! provision user <username> <email> [--tenant <id>] [--superuser]
//! ```
//!
//! Reads the same environment as the server (`DATABASE_URL`, `JWT_PUBLIC_KEY`, ...).

use payments_backend::{
    config::Config,
    domain::models::user::NewUser,
    infra::factory::bootstrap_state,
};
use std::process::ExitCode;

const USAGE: &str = "usage:\n  provision tenant <company name>\n  provision user <username> <email> [--tenant <id>] [--superuser]";

fn parse_user(args: &[String]) -> Result<NewUser, String> {
    let (username, email) = match args {
        [username, email, ..] => (username.clone(), email.clone()),
        _ => return Err("user needs <username> and <email>".into()),
    };

    let mut user = NewUser { username, email, is_superuser: false, tenant_id: None };
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--superuser" => user.is_superuser = true,
            "--tenant" => {
                let id = rest.next().ok_or("--tenant needs a value")?;
                user.tenant_id = Some(id.parse().map_err(|_| format!("invalid tenant id: {}", id))?);
            }
            other => return Err(format!("unknown flag: {}", other)),
        }
    }

    if !user.is_superuser && user.tenant_id.is_none() {
        return Err("regular users must belong to a tenant (--tenant <id>)".into());
    }
    Ok(user)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let config = Config::from_env();
    let state = bootstrap_state(&config).await;

    let outcome = match command.as_str() {
        "tenant" if !rest.is_empty() => state.tenant_repo.create(&rest.join(" ")).await
            .map(|t| format!("Created tenant {} ({})", t.id, t.company_name))
            .map_err(|e| e.to_string()),
        "user" => match parse_user(rest) {
            Ok(new_user) => state.user_repo.create(&new_user).await
                .map(|u| format!("Created user {} ({}), tenant {:?}, superuser {}", u.id, u.username, u.tenant_id, u.is_superuser))
                .map_err(|e| e.to_string()),
            Err(e) => Err(e),
        },
        _ => Err(USAGE.to_string()),
    };

    match outcome {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
