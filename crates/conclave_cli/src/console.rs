//! Interactive menu loop over the registry service.
//!
//! # Responsibility
//! - Collect typed input for each operation and render the outcome.
//! - Keep running after service errors; stop on `0` or end of input.

use crate::prompt::{PromptError, Prompter};
use crate::render;
use conclave_core::{NewMember, SanctumLocation, ServiceError, SqliteConclaveService};
use log::{info, warn};
use serde::Serialize;
use std::io::{self, BufRead, Write};

const MENU: &str = "
=== Conclave Registry ===

Retrieval Operations:
1. View timeline events by leader title
2. View factions by member count
3. View total members across all factions
4. Search artifacts by power
5. Generate monthly faction report
6. Analyze surveillance targets

Modification Operations:
7. Add new faction member
8. Update sanctum location
9. Delete artifact record
10. Update leader title name
11. Change faction head title

0. Exit

=========================";

#[derive(Debug)]
enum ConsoleError {
    Eof,
    Io(io::Error),
    Service(ServiceError),
}

impl From<PromptError> for ConsoleError {
    fn from(value: PromptError) -> Self {
        match value {
            PromptError::Eof => Self::Eof,
            PromptError::Io(err) => Self::Io(err),
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ServiceError> for ConsoleError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

type ConsoleResult<T> = Result<T, ConsoleError>;

pub struct Console<'svc, 'conn, R, W> {
    service: &'svc SqliteConclaveService<'conn>,
    prompter: Prompter<R, W>,
    json: bool,
}

impl<'svc, 'conn, R: BufRead, W: Write> Console<'svc, 'conn, R, W> {
    pub fn new(
        service: &'svc SqliteConclaveService<'conn>,
        input: R,
        output: W,
        json: bool,
    ) -> Self {
        Self {
            service,
            prompter: Prompter::new(input, output),
            json,
        }
    }

    /// Runs until the user exits or input ends.
    ///
    /// # Errors
    /// Only terminal I/O failures; service errors are printed and the loop goes on.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.prompter.output(), "{MENU}")?;
            let choice = match self.prompter.text("\nEnter your choice (0-11): ") {
                Ok(choice) => choice,
                Err(PromptError::Eof) => return self.farewell(),
                Err(PromptError::Io(err)) => return Err(err),
            };
            let choice = choice.trim();
            if choice == "0" {
                return self.farewell();
            }

            match self.dispatch(choice) {
                Ok(true) => info!("event=console_op module=cli status=ok choice={choice}"),
                Ok(false) => {
                    writeln!(self.prompter.output(), "\nInvalid choice. Please try again.")?
                }
                Err(ConsoleError::Service(err)) => {
                    warn!("event=console_op module=cli status=error choice={choice} error={err}");
                    writeln!(self.prompter.output(), "\nError: {err}")?;
                }
                Err(ConsoleError::Eof) => return self.farewell(),
                Err(ConsoleError::Io(err)) => return Err(err),
            }

            match self.prompter.pause() {
                Ok(()) => {}
                Err(PromptError::Eof) => return self.farewell(),
                Err(PromptError::Io(err)) => return Err(err),
            }
        }
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.prompter.output(), "\nExiting the conclave registry.")
    }

    /// Returns `false` for an unknown choice.
    fn dispatch(&mut self, choice: &str) -> ConsoleResult<bool> {
        match choice {
            "1" => self.events_by_member()?,
            "2" => self.factions_by_member_count()?,
            "3" => self.membership_statistics()?,
            "4" => self.search_artifacts()?,
            "5" => self.monthly_report()?,
            "6" => self.surveillance()?,
            "7" => self.add_member()?,
            "8" => self.relocate_sanctum()?,
            "9" => self.delete_artifact()?,
            "10" => self.rename_leader_title()?,
            "11" => self.change_faction_head()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn show_json<T: Serialize>(&mut self, value: &T) -> ConsoleResult<()> {
        render::json(self.prompter.output(), value)?;
        Ok(())
    }

    fn say(&mut self, message: &str) -> ConsoleResult<()> {
        writeln!(self.prompter.output(), "{message}")?;
        Ok(())
    }

    fn events_by_member(&mut self) -> ConsoleResult<()> {
        let title = self.prompter.text("\nEnter leader title: ")?;
        let events = self.service.events_by_member(&title)?;
        if self.json {
            return self.show_json(&events);
        }
        render::events(self.prompter.output(), &title, &events)?;
        Ok(())
    }

    fn factions_by_member_count(&mut self) -> ConsoleResult<()> {
        let min_members = self
            .prompter
            .integer::<i64>("\nEnter minimum number of members: ")?;
        let factions = self.service.factions_by_member_count(min_members)?;
        if self.json {
            return self.show_json(&factions);
        }
        render::factions(self.prompter.output(), min_members, &factions)?;
        Ok(())
    }

    fn membership_statistics(&mut self) -> ConsoleResult<()> {
        let stats = self.service.membership_statistics()?;
        if self.json {
            return self.show_json(&stats);
        }
        render::membership(self.prompter.output(), &stats)?;
        Ok(())
    }

    fn search_artifacts(&mut self) -> ConsoleResult<()> {
        let power = self.prompter.text("\nEnter power to search for: ")?;
        let matches = self.service.search_artifacts_by_power(&power)?;
        if self.json {
            return self.show_json(&matches);
        }
        render::artifacts(self.prompter.output(), &matches)?;
        Ok(())
    }

    fn monthly_report(&mut self) -> ConsoleResult<()> {
        let year = self.prompter.integer::<i32>("Enter year (YYYY): ")?;
        let month = self.prompter.integer::<i64>("Enter month (1-12): ")?;
        let report = self.service.monthly_faction_report(year, month)?;
        if self.json {
            return self.show_json(&report);
        }
        render::monthly(self.prompter.output(), &report)?;
        Ok(())
    }

    fn surveillance(&mut self) -> ConsoleResult<()> {
        let analysis = self.service.surveillance_analysis()?;
        if self.json {
            return self.show_json(&analysis);
        }
        render::surveillance(self.prompter.output(), &analysis)?;
        Ok(())
    }

    fn add_member(&mut self) -> ConsoleResult<()> {
        self.say("\n=== Add New Faction Member ===")?;
        let member = NewMember {
            member_id: self.prompter.integer("Enter member ID: ")?,
            first_name: self.prompter.text("Enter first name: ")?,
            middle_name: self
                .prompter
                .optional_text("Enter middle name (press Enter to skip): ")?,
            last_name: self.prompter.text("Enter last name: ")?,
            dob: self.prompter.date("Enter date of birth (YYYY-MM-DD): ")?,
            faction_id: self.prompter.integer("Enter faction ID: ")?,
            leader_id: self.prompter.optional_id("Enter leader ID (0 for none): ")?,
        };
        self.service.add_faction_member(member)?;
        self.say("Member added successfully!")
    }

    fn relocate_sanctum(&mut self) -> ConsoleResult<()> {
        self.say("\n=== Update Sanctum Location ===")?;
        let mantra = self.prompter.text("Enter sanctum mantra: ")?;
        let location = SanctumLocation {
            street: self.prompter.text("Enter new street address: ")?,
            city: self.prompter.text("Enter new city: ")?,
            country: self.prompter.text("Enter new country: ")?,
        };
        self.service.update_sanctum_location(&mantra, location)?;
        self.say("Location updated successfully!")
    }

    fn delete_artifact(&mut self) -> ConsoleResult<()> {
        let artifact_id = self
            .prompter
            .integer::<i64>("\nEnter artifact ID to delete: ")?;
        let confirmed = self
            .prompter
            .confirm("Are you sure you want to delete this artifact? (y/n): ")?;
        if !confirmed {
            return self.say("Deletion cancelled.");
        }
        let deletion = self.service.delete_artifact(artifact_id)?;
        render::deletion(self.prompter.output(), &deletion)?;
        Ok(())
    }

    fn rename_leader_title(&mut self) -> ConsoleResult<()> {
        self.say("\n=== Update Leader Title Name ===")?;
        let title = self.prompter.text("Enter leader title: ")?;
        let new_name = self.prompter.text("Enter new name: ")?;
        self.service.update_leader_title_name(&title, &new_name)?;
        self.say("Name updated successfully!")
    }

    fn change_faction_head(&mut self) -> ConsoleResult<()> {
        self.say("\n=== Change Faction Head Title ===")?;
        let faction_id = self.prompter.integer::<i64>("Enter faction ID: ")?;
        let new_head_title = self.prompter.text("Enter new head title: ")?;
        self.service
            .update_faction_head(faction_id, &new_head_title)?;
        self.say("Faction head updated successfully!")
    }
}
