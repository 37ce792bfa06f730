//! Registry use-case service.
//!
//! # Responsibility
//! - Expose the eleven console operations plus sanctum lookup.
//! - Trim required text fields and reject blank ones before any query runs.
//!
//! # Invariants
//! - Service APIs never bypass repository checks or the write guard.
//! - Repository errors pass through unchanged inside `ServiceError::Repo`.

use crate::model::member::{ArtifactId, FactionId, NewMember};
use crate::model::report::{
    ArtifactDeletion, ArtifactPowerMatch, FactionHeadcount, MembershipStats,
    MonthlyFactionReport, OrchestratedEvent, SurveillanceAnalysis,
};
use crate::model::sanctum::{Sanctum, SanctumLocation};
use crate::repo::error::RepoError;
use crate::repo::registry_repo::RegistryRepository;
use crate::repo::report_repo::ReportRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from registry service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Required text field is blank after trim.
    BlankField(&'static str),
    /// Month outside `1..=12`.
    InvalidMonth(i64),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidMonth(month) => write!(f, "month must be between 1 and 12, got {month}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Registry service facade over the report and registry repositories.
pub struct ConclaveService<R: ReportRepository, W: RegistryRepository> {
    reports: R,
    registry: W,
}

impl<R: ReportRepository, W: RegistryRepository> ConclaveService<R, W> {
    pub fn new(reports: R, registry: W) -> Self {
        Self { reports, registry }
    }

    pub fn events_by_member(&self, title: &str) -> ServiceResult<Vec<OrchestratedEvent>> {
        let title = required("title", title)?;
        Ok(self.reports.events_by_member(&title)?)
    }

    pub fn factions_by_member_count(
        &self,
        min_members: i64,
    ) -> ServiceResult<Vec<FactionHeadcount>> {
        Ok(self.reports.factions_by_member_count(min_members)?)
    }

    pub fn membership_statistics(&self) -> ServiceResult<MembershipStats> {
        Ok(self.reports.membership_statistics()?)
    }

    /// Substring is passed through untrimmed; an empty one matches every power.
    pub fn search_artifacts_by_power(
        &self,
        substring: &str,
    ) -> ServiceResult<Vec<ArtifactPowerMatch>> {
        Ok(self.reports.search_artifacts_by_power(substring)?)
    }

    pub fn monthly_faction_report(
        &self,
        year: i32,
        month: i64,
    ) -> ServiceResult<MonthlyFactionReport> {
        let calendar_month = u32::try_from(month)
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or(ServiceError::InvalidMonth(month))?;
        Ok(self.reports.monthly_faction_report(year, calendar_month)?)
    }

    pub fn surveillance_analysis(&self) -> ServiceResult<SurveillanceAnalysis> {
        Ok(self.reports.surveillance_analysis()?)
    }

    pub fn get_sanctum(&self, mantra: &str) -> ServiceResult<Option<Sanctum>> {
        let mantra = required("mantra", mantra)?;
        Ok(self.reports.get_sanctum(&mantra)?)
    }

    /// Adds a member; a blank middle name is stored as NULL.
    pub fn add_faction_member(&self, member: NewMember) -> ServiceResult<()> {
        let member = NewMember {
            first_name: required("first name", &member.first_name)?,
            middle_name: optional(member.middle_name),
            last_name: required("last name", &member.last_name)?,
            ..member
        };
        Ok(self.registry.add_faction_member(&member)?)
    }

    pub fn update_sanctum_location(
        &self,
        mantra: &str,
        location: SanctumLocation,
    ) -> ServiceResult<()> {
        let mantra = required("mantra", mantra)?;
        let location = SanctumLocation {
            street: required("street", &location.street)?,
            city: required("city", &location.city)?,
            country: required("country", &location.country)?,
        };
        Ok(self.registry.update_sanctum_location(&mantra, &location)?)
    }

    pub fn delete_artifact(&self, artifact_id: ArtifactId) -> ServiceResult<ArtifactDeletion> {
        Ok(self.registry.delete_artifact(artifact_id)?)
    }

    pub fn update_leader_title_name(&self, title: &str, new_name: &str) -> ServiceResult<()> {
        let title = required("title", title)?;
        let new_name = required("new name", new_name)?;
        Ok(self.registry.update_leader_title_name(&title, &new_name)?)
    }

    pub fn update_faction_head(
        &self,
        faction_id: FactionId,
        new_head_title: &str,
    ) -> ServiceResult<()> {
        let new_head_title = required("head title", new_head_title)?;
        Ok(self
            .registry
            .update_faction_head(faction_id, &new_head_title)?)
    }
}

fn required(field: &'static str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
