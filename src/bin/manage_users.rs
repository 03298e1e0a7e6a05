//! CLI tool to provision login users.
//!
//! Usage:
//!   cargo run --bin manage-users -- migrate
//!   cargo run --bin manage-users -- add --name <name> --password <password>
//!   cargo run --bin manage-users -- passwd --name <name> --password <password>
//!   cargo run --bin manage-users -- list

use std::env;

use board_checker_lib::config::Config;
use board_checker_lib::db::DbPool;
use board_checker_lib::db::users::{self, UserError};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    // Initialize database
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "migrate" => migrate(&pool).await,
        "add" => {
            let name = required_arg(&args, "--name", "-n");
            let password = required_arg(&args, "--password", "-p");
            add_user(&pool, &name, &password).await;
        }
        "passwd" => {
            let name = required_arg(&args, "--name", "-n");
            let password = required_arg(&args, "--password", "-p");
            change_password(&pool, &name, &password).await;
        }
        "list" | "ls" => list_users(&pool).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn required_arg(args: &[String], long: &str, short: &str) -> String {
    let mut i = 2;
    while i < args.len() {
        if (args[i] == long || args[i] == short) && i + 1 < args.len() {
            return args[i + 1].clone();
        }
        i += 1;
    }
    eprintln!("Error: {} is required", long);
    std::process::exit(1);
}

async fn migrate(pool: &DbPool) {
    match pool.run_migrations().await {
        Ok(()) => println!("Migrations applied."),
        Err(e) => {
            eprintln!("Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn add_user(pool: &DbPool, name: &str, password: &str) {
    match users::insert_user(pool.connection(), name, password).await {
        Ok(user) => {
            println!("User {} created (id {}).", user.name, user.id);
        }
        Err(UserError::DuplicateName) => {
            eprintln!("User {} already exists.", name.trim());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn change_password(pool: &DbPool, name: &str, password: &str) {
    match users::change_password(pool.connection(), name, password).await {
        Ok(()) => {
            println!("Password for {} updated.", name.trim());
        }
        Err(e) => {
            eprintln!("Error updating password: {}", e);
            std::process::exit(1);
        }
    }
}

async fn list_users(pool: &DbPool) {
    let all = match users::list_all(pool.connection()).await {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error listing users: {}", e);
            std::process::exit(1);
        }
    };

    if all.is_empty() {
        println!("No users found.");
        return;
    }

    println!();
    println!("{:<8} {:<32} {:<20}", "ID", "NAME", "CREATED");
    println!("{}", "-".repeat(62));

    for user in all {
        println!(
            "{:<8} {:<32} {:<20}",
            user.id,
            user.name,
            user.created.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: manage-users <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  migrate                                 Apply database migrations");
    eprintln!("  add --name <name> --password <pw>       Create a user");
    eprintln!("  passwd --name <name> --password <pw>    Replace a user's password");
    eprintln!("  list, ls                                List all users");
    eprintln!("  help                                    Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  manage-users migrate");
    eprintln!("  manage-users add --name inspector --password 'correct horse'");
    eprintln!();
}
