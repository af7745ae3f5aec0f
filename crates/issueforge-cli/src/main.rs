//! IssueForge CLI
//!
//! Interactive menu for creating bugs (from pasted text) and test cases
//! (prompted field by field) in JIRA.

use anyhow::{Context, Result};
use clap::Parser;
use issueforge_core::extract;
use issueforge_core::models::{IssuePayload, IssueType};
use issueforge_core::render::{self, BugRenderMode, TestStepStyle};
use issueforge_jira::{Error as JiraError, JiraClient, JiraConfig};
use std::io::{self, Write};

mod prompt;

#[derive(Parser, Debug)]
#[command(name = "issueforge")]
#[command(about = "IssueForge - create JIRA bugs and test cases from the terminal", long_about = None)]
struct Args {
    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .init();

    let config = JiraConfig::from_env().context("Failed to load JIRA configuration")?;
    let client = JiraClient::new(&config).context("Failed to initialize JIRA client")?;

    loop {
        println!("\n===== JIRA Automation Tool =====");
        println!("1. Create Bug");
        println!("2. Create Test Case");
        println!("3. Exit");
        print!("\nEnter your choice (1/2/3): ");
        io::stdout().flush()?;

        // EOF on stdin (piped input, ctrl-d) ends the session like an
        // explicit exit would.
        let Some(choice) = prompt::read_line(&mut io::stdin().lock())? else {
            println!("\nExiting...");
            break;
        };
        match choice.as_str() {
            "1" => create_bug(&client, &config).await?,
            "2" => create_test_case(&client, &config).await?,
            "3" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice! Please enter 1, 2, or 3."),
        }
    }

    Ok(())
}

async fn create_bug(client: &JiraClient, config: &JiraConfig) -> Result<()> {
    println!("\nPaste the full bug details and press Enter (type 'done' on a new line to finish):");
    let pasted = prompt::read_until_done(&mut io::stdin().lock())?;

    let record = extract::extract_bug(&pasted);
    let payload = IssuePayload {
        project_key: config.default_project_key.clone(),
        summary: record.title.clone(),
        description: render::render_bug(&record, BugRenderMode::RecordEnvironment),
        issuetype: IssueType::Bug,
        labels: vec!["Bug".to_string(), "Automation".to_string()],
    };

    submit(client, &payload, "Bug").await;
    Ok(())
}

async fn create_test_case(client: &JiraClient, config: &JiraConfig) -> Result<()> {
    let record = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        prompt::read_test_case(&mut stdin, &mut stdout)?
    };

    let payload = IssuePayload {
        project_key: config.default_project_key.clone(),
        summary: record.title.clone(),
        description: render::render_test_case(
            &record.preconditions,
            &record.steps,
            TestStepStyle::Flat,
        ),
        issuetype: IssueType::Test,
        labels: Vec::new(),
    };

    submit(client, &payload, "Test Case").await;
    Ok(())
}

async fn submit(client: &JiraClient, payload: &IssuePayload, kind: &str) {
    match client.create_issue(payload).await {
        Ok(issue) => {
            println!(
                "{} '{}' created successfully: {}",
                kind,
                payload.summary,
                client.browse_url(&issue.key)
            );
        }
        Err(JiraError::Api { status, body }) => {
            println!(
                "Failed to create {} '{}'. Status code: {}",
                kind, payload.summary, status
            );
            println!("Response: {}", body);
        }
        Err(other) => {
            println!("Failed to create {} '{}': {}", kind, payload.summary, other);
        }
    }
}
