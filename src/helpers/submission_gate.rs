use crate::errors::{PortalError, PortalResult};
use crate::structs::submission_ticket::SubmissionTicket;

/// Blocks re-entrant submits and recognises responses for discarded drafts.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    generation: u64,
    in_flight: bool,
}

impl SubmissionGate {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn begin(&mut self) -> PortalResult<SubmissionTicket> {
        if self.in_flight {
            return Err(PortalError::SubmissionInFlight);
        }
        self.in_flight = true;
        Ok(SubmissionTicket {
            generation: self.generation,
        })
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Ends the in-flight state for a current ticket. Returns `false` for a stale one.
    pub fn finish(&mut self, ticket: SubmissionTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Starts a new draft generation; outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_until_finish() {
        let mut gate = SubmissionGate::default();
        let ticket = gate.begin().unwrap();
        assert!(matches!(gate.begin(), Err(PortalError::SubmissionInFlight)));
        assert!(gate.finish(ticket));
        assert!(gate.begin().is_ok());
    }

    #[test]
    fn reset_makes_tickets_stale() {
        let mut gate = SubmissionGate::default();
        let ticket = gate.begin().unwrap();
        gate.reset();
        assert!(!gate.is_in_flight());
        assert!(!gate.finish(ticket));
    }
}
