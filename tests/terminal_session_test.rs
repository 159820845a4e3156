use anyhow::Result;
use event_registration::domain::model::FormSettings;
use event_registration::{HttpRegistrationApi, RegistrationApp, Screen, TerminalSession};
use httpmock::prelude::*;
use serde_json::json;
use std::io::Cursor;
use std::time::Duration;

async fn run_script(server: &MockServer, script: &str) -> Result<(Screen, String)> {
    let api = HttpRegistrationApi::new(&server.base_url(), Duration::from_secs(5), None)?;
    let app = RegistrationApp::new(api, FormSettings::default());
    let mut session = TerminalSession::new(app, Cursor::new(script.to_string()), Vec::new());
    session.run().await?;

    let (app, output) = session.into_parts();
    Ok((app.screen().clone(), String::from_utf8(output)?))
}

#[tokio::test]
async fn test_scripted_registration() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/check-employee")
                .query_param("empId", "E100");
            then.status(200)
                .json_body(json!({"empName": "Jane Doe", "companyName": "Acme"}));
        })
        .await;
    let register_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/register").json_body(json!({
                "empId": "E100",
                "phoneNumber": "5551234",
                "participants": "12"
            }));
            then.status(200).json_body(json!({"rnd": "A0042"}));
        })
        .await;

    // proceed, id, phone, participants, then Done on the thank-you screen
    let script = "\ne100\n555 1234\n12\n\n";
    let (screen, output) = run_script(&server, script).await?;

    register_mock.assert_async().await;
    assert!(output.contains("Name:    Jane Doe"));
    assert!(output.contains("Thank You!"));
    assert!(output.contains("A0042"));
    assert_eq!(screen.name(), "welcome");
    Ok(())
}

#[tokio::test]
async fn test_scripted_missing_fields_alert() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/check-employee");
            then.status(200)
                .json_body(json!({"empName": "Jane Doe", "companyName": "Acme"}));
        })
        .await;

    let script = "\nE100\nabc\n2\n";
    let (screen, output) = run_script(&server, script).await?;

    assert!(output.contains("[!] Error: Please fill in all fields"));
    assert_eq!(screen.name(), "register");
    Ok(())
}

#[tokio::test]
async fn test_scripted_unknown_employee_shows_field_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/check-employee");
            then.status(404)
                .json_body(json!({"error": "Employee ID not found"}));
        })
        .await;

    let script = "\nZZ99\n:back\nq\n";
    let (screen, output) = run_script(&server, script).await?;

    assert!(output.contains("! Employee ID not found"));
    assert_eq!(screen.name(), "welcome");
    Ok(())
}

#[tokio::test]
async fn test_scripted_network_error_and_quit() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        })
        .await;

    let script = "\n\nq\n";
    let (screen, output) = run_script(&server, script).await?;

    assert!(output.contains("Network Error"));
    assert_eq!(screen.name(), "welcome");
    Ok(())
}

#[tokio::test]
async fn test_scripted_admin_dashboard() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/admin-login");
            then.status(200);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/admin-stats");
            then.status(200).json_body(json!({
                "stats": [{"company": "Acme", "registered": 2, "participants": 5}],
                "totalParticipants": 5,
                "totalRegistered": 2
            }));
        })
        .await;

    let script = "\nadmin\nsecret\nl\n";
    let (screen, output) = run_script(&server, script).await?;

    assert!(output.contains("Admin Login") || output.contains("Password"));
    assert!(output.contains("Total Registered:   2"));
    assert!(output.contains("Acme"));
    assert_eq!(screen.name(), "welcome");
    Ok(())
}
