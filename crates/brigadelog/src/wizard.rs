//! Wizard controller.
//!
//! A state machine over the registered section order plus two phases,
//! in-progress and finished. The controller validates the section being
//! left, runs the persistence gateway, and only then moves the section
//! pointer. Backward navigation is unconditional and never touches the
//! network.
//!
//! Submits resolve asynchronously, and navigation may happen while one is
//! in flight. Every submit therefore captures the current epoch in a
//! [`SubmitTicket`]; [`Wizard::apply_submit`] discards any result whose
//! ticket epoch no longer matches, so a stale resolution cannot corrupt
//! later state. [`Wizard::submit`] composes the two halves for callers
//! that hold the wizard across the await.

use tracing::{debug, info, warn};

use crate::catalog::{self, Section, SectionId, SECTIONS};
use crate::draft::Draft;
use crate::error::Result;
use crate::remote::{gateway, BrigadeId, RemoteApi};
use crate::validate::{self, FieldError};

/// The wizard's lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Collecting sections.
    #[default]
    InProgress,
    /// Every section was submitted; terminal.
    Finished,
}

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The section persisted and the wizard moved on.
    Advanced {
        /// The section now active.
        to: SectionId,
    },
    /// The last section persisted; the wizard is finished.
    Finished,
    /// Validation rejected the section; nothing was persisted.
    Rejected {
        /// The field errors to display.
        errors: Vec<FieldError>,
    },
    /// The result belonged to an abandoned submit and was discarded.
    Stale,
}

/// Where a successful submit navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavTarget {
    /// The next section in order (or finished, from the last one).
    Next,
    /// An explicit section index (direct tab jump).
    Index(usize),
}

/// Captures the state a submit was started from.
///
/// Created by [`Wizard::begin_submit`]; consumed by
/// [`Wizard::apply_submit`], which ignores the result when the wizard has
/// navigated since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    epoch: u64,
    section: SectionId,
    target: NavTarget,
}

impl SubmitTicket {
    /// The section this submit belongs to.
    #[must_use]
    pub fn section(&self) -> SectionId {
        self.section
    }
}

/// Result of the gateway work between `begin_submit` and `apply_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOutcome {
    /// The brigade id the calls ran against (freshly created or existing).
    pub brigade_id: BrigadeId,
    /// Whether the profile was created during this submit.
    pub created: bool,
    /// Number of remote calls issued for the section.
    pub calls: usize,
}

/// The multi-section wizard controller.
#[derive(Debug)]
pub struct Wizard {
    draft: Draft,
    brigade_id: Option<BrigadeId>,
    current: usize,
    phase: Phase,
    status: Option<String>,
    epoch: u64,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(Draft::new())
    }
}

impl Wizard {
    /// Start a wizard over the given draft, at the first section.
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            brigade_id: None,
            current: 0,
            phase: Phase::InProgress,
            status: None,
            epoch: 0,
        }
    }

    /// The active section's descriptor.
    #[must_use]
    pub fn current_section(&self) -> &'static Section {
        &SECTIONS[self.current]
    }

    /// The active section's index in progression order.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Progress fraction for the active section.
    #[must_use]
    pub fn progress(&self) -> f32 {
        catalog::progress(self.current)
    }

    /// The wizard's lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The brigade id, once the profile has been created remotely.
    #[must_use]
    pub fn brigade_id(&self) -> Option<&BrigadeId> {
        self.brigade_id.as_ref()
    }

    /// The transient status message, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Clear the transient status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Borrow the draft.
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutably borrow the draft for edits.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Validate the active section without navigating.
    #[must_use]
    pub fn validate_current(&self) -> Vec<FieldError> {
        validate::validate(self.current_section().id, &self.draft)
    }

    /// Move back one section. Unconditional: no validation, no network.
    pub fn go_back(&mut self) {
        if self.phase == Phase::Finished || self.current == 0 {
            return;
        }
        self.navigate_to(self.current - 1);
    }

    /// Validate, persist and advance the active section.
    ///
    /// # Errors
    ///
    /// Returns any gateway error after recording it as the status message;
    /// the wizard stays on the current section so the user can retry.
    pub async fn submit(&mut self, api: &dyn RemoteApi) -> Result<SubmitOutcome> {
        self.submit_towards(api, NavTarget::Next).await
    }

    /// Jump to an arbitrary section.
    ///
    /// Jumping backward (or to the active section) is unconditional.
    /// Jumping forward re-runs validation and persistence for the section
    /// being left, exactly like an advance.
    ///
    /// # Errors
    ///
    /// Returns any gateway error from persisting the section being left.
    pub async fn jump_to(
        &mut self,
        api: &dyn RemoteApi,
        target: SectionId,
    ) -> Result<SubmitOutcome> {
        let target_index = catalog::index_of(target);
        if self.phase == Phase::Finished {
            return Ok(SubmitOutcome::Stale);
        }
        if target_index <= self.current {
            self.navigate_to(target_index);
            return Ok(SubmitOutcome::Advanced { to: target });
        }
        self.submit_towards(api, NavTarget::Index(target_index)).await
    }

    /// Capture the state a submit starts from.
    ///
    /// Use together with [`Self::apply_submit`] when the gateway work is
    /// driven outside the wizard; [`Self::submit`] is the composed form.
    #[must_use]
    pub fn begin_submit(&self) -> SubmitTicket {
        SubmitTicket {
            epoch: self.epoch,
            section: self.current_section().id,
            target: NavTarget::Next,
        }
    }

    /// Apply the result of a submit's gateway work.
    ///
    /// When the wizard navigated since the ticket was issued, the result
    /// is discarded entirely and `Stale` is returned: side effects of an
    /// abandoned submit must not touch the current state.
    ///
    /// # Errors
    ///
    /// Passes the gateway error through after recording it as the status
    /// message.
    pub fn apply_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<GatewayOutcome>,
    ) -> Result<SubmitOutcome> {
        if ticket.epoch != self.epoch {
            warn!(
                "Discarding stale submit result for section {}",
                ticket.section
            );
            return Ok(SubmitOutcome::Stale);
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.status = Some(err.to_string());
                return Err(err);
            }
        };

        self.brigade_id = Some(outcome.brigade_id);

        let last = self.current == SECTIONS.len() - 1;
        match ticket.target {
            NavTarget::Next if last => {
                self.phase = Phase::Finished;
                self.epoch += 1;
                self.status = Some("All sections submitted".to_string());
                info!("Wizard finished");
                Ok(SubmitOutcome::Finished)
            }
            NavTarget::Next => {
                self.navigate_to(self.current + 1);
                self.status = Some(saved_message(ticket.section));
                Ok(SubmitOutcome::Advanced {
                    to: self.current_section().id,
                })
            }
            NavTarget::Index(index) => {
                self.navigate_to(index);
                self.status = Some(saved_message(ticket.section));
                Ok(SubmitOutcome::Advanced {
                    to: self.current_section().id,
                })
            }
        }
    }

    async fn submit_towards(
        &mut self,
        api: &dyn RemoteApi,
        target: NavTarget,
    ) -> Result<SubmitOutcome> {
        let errors = self.validate_current();
        if !errors.is_empty() {
            debug!(
                "Section {} rejected with {} field error(s)",
                self.current_section().id,
                errors.len()
            );
            self.status = Some(format!("{} field(s) need attention", errors.len()));
            return Ok(SubmitOutcome::Rejected { errors });
        }

        let ticket = SubmitTicket {
            epoch: self.epoch,
            section: self.current_section().id,
            target,
        };
        let result = self.run_gateway(api, ticket.section).await;
        self.apply_submit(ticket, result)
    }

    /// Ensure the brigade exists remotely, then run the section sub-step.
    ///
    /// The profile must be created and its id obtained before any
    /// item-level call for the section is attempted.
    async fn run_gateway(
        &self,
        api: &dyn RemoteApi,
        section: SectionId,
    ) -> Result<GatewayOutcome> {
        let (brigade_id, created) = match self.brigade_id.clone() {
            Some(id) => (id, false),
            None => (gateway::create_profile(api, &self.draft).await?, true),
        };

        // For the info section a fresh create already was the sub-step;
        // everything else (and a revisited info section) runs its own.
        let calls = if section == SectionId::Info && created {
            1
        } else {
            gateway::submit_section(api, &brigade_id, section, &self.draft)
                .await?
                .calls
        };

        Ok(GatewayOutcome {
            brigade_id,
            created,
            calls,
        })
    }

    fn navigate_to(&mut self, index: usize) {
        debug_assert!(index < SECTIONS.len());
        debug!(
            "Navigating from section index {} to {}",
            self.current, index
        );
        self.current = index;
        self.epoch += 1;
        self.status = None;
    }
}

fn saved_message(section: SectionId) -> String {
    format!("{} saved", catalog::section(section).display_name)
}
