use crate::core::app::{AppEvent, RegistrationApp, Screen};
use crate::core::confirmation::{Confirmation, ConfirmationEvent};
use crate::core::dashboard::{DashboardEvent, DashboardState};
use crate::core::form::{FormEvent, FormState};
use crate::core::welcome::WelcomeEvent;
use crate::domain::model::FormMode;
use crate::domain::ports::RegistrationApi;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const BACK_COMMAND: &str = ":back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

/// Line-oriented front-end: one prompt per field, end of input quits.
pub struct TerminalSession<A: RegistrationApi, R: BufRead, W: Write> {
    app: RegistrationApp<A>,
    input: R,
    output: W,
}

impl<A: RegistrationApi, R: BufRead, W: Write> TerminalSession<A, R, W> {
    pub fn new(app: RegistrationApp<A>, input: R, output: W) -> Self {
        Self { app, input, output }
    }

    pub fn into_parts(self) -> (RegistrationApp<A>, W) {
        (self.app, self.output)
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            render_screen(self.app.screen(), &mut self.output)?;
            let step = match self.app.screen() {
                Screen::Welcome(_) => self.welcome_turn().await?,
                Screen::Register(_) => self.register_turn().await?,
                Screen::ThankYou(_) => {
                    let done = AppEvent::Confirmation(ConfirmationEvent::Done);
                    self.acknowledge("Press Enter when done", done).await?
                }
                Screen::NetworkError => {
                    self.acknowledge("Press Enter to try again", AppEvent::TryAgain)
                        .await?
                }
                Screen::AdminDashboard(_) => self.dashboard_turn().await?,
            };
            self.flush_alerts()?;
            if step == Step::Quit {
                tracing::info!("Input closed, leaving session");
                return Ok(());
            }
        }
    }

    async fn welcome_turn(&mut self) -> Result<Step> {
        let Some(line) = self.prompt("Press Enter to proceed (q to quit)")? else {
            return Ok(Step::Quit);
        };
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(Step::Quit);
        }
        writeln!(self.output, "Connecting...")?;
        self.app
            .dispatch(AppEvent::Welcome(WelcomeEvent::Proceed))
            .await;
        Ok(Step::Continue)
    }

    async fn register_turn(&mut self) -> Result<Step> {
        let Some(emp_id) = self.prompt("Employee ID (:back to return)")? else {
            return Ok(Step::Quit);
        };
        if emp_id.trim() == BACK_COMMAND {
            self.form(FormEvent::Back).await;
            return Ok(Step::Continue);
        }

        self.form(FormEvent::EmpIdChanged(emp_id)).await;
        self.form(FormEvent::EmpIdBlurred).await;

        let form = match self.app.screen() {
            Screen::Register(form) => form.clone(),
            _ => return Ok(Step::Continue),
        };
        if form.draft().field_error.is_some() {
            return Ok(Step::Continue);
        }

        match form.mode() {
            FormMode::Admin => {
                let Some(password) = self.prompt("Password")? else {
                    return Ok(Step::Quit);
                };
                self.form(FormEvent::PasswordChanged(password)).await;
            }
            FormMode::Normal => {
                writeln!(self.output, "Name:    {}", form.draft().emp_name)?;
                writeln!(self.output, "Company: {}", form.draft().company_name)?;
                let Some(phone) = self.prompt("Phone Number")? else {
                    return Ok(Step::Quit);
                };
                self.form(FormEvent::PhoneChanged(phone)).await;
                let Some(participants) = self.prompt("No. of Participants")? else {
                    return Ok(Step::Quit);
                };
                self.form(FormEvent::ParticipantsChanged(participants)).await;
            }
        }

        self.form(FormEvent::Submit).await;
        Ok(Step::Continue)
    }

    async fn dashboard_turn(&mut self) -> Result<Step> {
        let Some(line) = self.prompt("[r]etry, [l]ogout")? else {
            return Ok(Step::Quit);
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "retry" => {
                self.app
                    .dispatch(AppEvent::Dashboard(DashboardEvent::Retry))
                    .await
            }
            "l" | "logout" => {
                self.app
                    .dispatch(AppEvent::Dashboard(DashboardEvent::Logout))
                    .await
            }
            _ => {}
        }
        Ok(Step::Continue)
    }

    async fn acknowledge(&mut self, label: &str, event: AppEvent) -> Result<Step> {
        if self.prompt(label)?.is_none() {
            return Ok(Step::Quit);
        }
        self.app.dispatch(event).await;
        Ok(Step::Continue)
    }

    async fn form(&mut self, event: FormEvent) {
        self.app.dispatch(AppEvent::Form(event)).await;
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn flush_alerts(&mut self) -> Result<()> {
        for alert in self.app.take_alerts() {
            writeln!(self.output, "[!] Error: {}", alert)?;
        }
        Ok(())
    }
}

pub fn render_screen<W: Write>(screen: &Screen, out: &mut W) -> Result<()> {
    writeln!(out)?;
    match screen {
        Screen::Welcome(_) => {
            writeln!(out, "Welcome")?;
            writeln!(out, "To the Event Registration")?;
        }
        Screen::Register(form) => render_form(form, out)?,
        Screen::ThankYou(confirmation) => render_confirmation(confirmation, out)?,
        Screen::NetworkError => {
            writeln!(out, "Network Error")?;
            writeln!(
                out,
                "Unable to connect to the server. Please check your connection and try again later."
            )?;
        }
        Screen::AdminDashboard(dashboard) => render_dashboard(dashboard, out)?,
    }
    Ok(())
}

fn render_form<W: Write>(form: &FormState, out: &mut W) -> Result<()> {
    match form.mode() {
        FormMode::Normal => writeln!(out, "Registration")?,
        FormMode::Admin => writeln!(out, "Admin Login")?,
    }
    if let Some(error) = &form.draft().field_error {
        writeln!(out, "  ! {}", error)?;
    }
    if let Some(error) = form.login_error() {
        writeln!(out, "  ! {}", error)?;
    }
    Ok(())
}

fn render_confirmation<W: Write>(confirmation: &Confirmation, out: &mut W) -> Result<()> {
    writeln!(out, "{}", confirmation.title())?;
    writeln!(out, "{}", confirmation.subtitle())?;
    writeln!(out)?;
    writeln!(out, "Your Registration Number")?;
    writeln!(out, "    {}", confirmation.result().registration_number)?;
    writeln!(out, "Take a screenshot for reference.")?;
    writeln!(out)?;
    writeln!(out, "Registration Details:")?;
    for (label, value) in confirmation.details() {
        writeln!(out, "  {:<14}{}", format!("{}:", label), value)?;
    }
    Ok(())
}

fn render_dashboard<W: Write>(dashboard: &DashboardState, out: &mut W) -> Result<()> {
    writeln!(out, "Dashboard")?;
    if dashboard.is_loading() {
        writeln!(out, "Loading...")?;
    }
    if let Some(error) = dashboard.error() {
        writeln!(out, "  ! {}", error)?;
    }
    if let Some(stats) = dashboard.stats() {
        writeln!(out, "Total Registered:   {}", stats.total_registered)?;
        writeln!(out, "Total Participants: {}", stats.total_participants)?;
        writeln!(out)?;
        writeln!(out, "{:<28} {:>5} {:>12}", "Company", "Reg", "Participants")?;
        for row in &stats.per_company {
            writeln!(
                out,
                "{:<28} {:>5} {:>12}",
                row.company, row.registered, row.participants
            )?;
        }
    }
    Ok(())
}
