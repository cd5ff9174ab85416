//! One side of a server/client pair.

use crate::core::{RemoteGuard, Role, RuleTable, State, TimeoutPolicy, TransitionMatching};
use crate::peer::transition::{Absorption, TransitionError};
use crate::snapshot::{MachineSnapshot, SnapshotError};
use std::sync::Arc;
use tracing::{debug, trace};

/// State machine for one role of a synchronized pair.
///
/// Holds the local state and the last observed state of the counterpart.
/// Local moves are validated against the role's own rules; observed remote
/// moves are validated against the counterpart's rules and this role's
/// guards. Rule tables and guards are shared, immutable, and fixed at build
/// time.
///
/// The two state slots are unsynchronized: callers sharing a machine across
/// threads must provide their own mutual exclusion.
#[derive(Clone, Debug)]
pub struct PeerMachine<S: State> {
    role: Role,
    state: S,
    remote_state: S,
    own_rules: Arc<RuleTable<S>>,
    remote_rules: Arc<RuleTable<S>>,
    guards: Arc<Vec<RemoteGuard<S>>>,
    timeout: Option<TimeoutPolicy<S>>,
}

impl<S: State> PeerMachine<S> {
    pub(crate) fn new(
        role: Role,
        initial: S,
        own_rules: Arc<RuleTable<S>>,
        remote_rules: Arc<RuleTable<S>>,
        guards: Arc<Vec<RemoteGuard<S>>>,
        timeout: Option<TimeoutPolicy<S>>,
    ) -> Self {
        Self {
            role,
            state: initial.clone(),
            remote_state: initial,
            own_rules,
            remote_rules,
            guards,
            timeout,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_server(&self) -> bool {
        self.role == Role::Server
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }

    /// Current local state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Last state observed from the counterpart
    pub fn remote_state(&self) -> &S {
        &self.remote_state
    }

    /// Whether the local state equals the last observed remote state
    pub fn in_agreement(&self) -> bool {
        self.state == self.remote_state
    }

    /// Rules governing this role's own moves
    pub fn own_rules(&self) -> &RuleTable<S> {
        &self.own_rules
    }

    /// The counterpart's rules, consulted when absorbing its state
    pub fn remote_rules(&self) -> &RuleTable<S> {
        &self.remote_rules
    }

    pub fn timeout(&self) -> Option<&TimeoutPolicy<S>> {
        self.timeout.as_ref()
    }

    /// Validate a local move without performing it (pure).
    ///
    /// Returns the matching policy of the rule that would be used.
    pub fn check_transition(&self, to: &S) -> Result<TransitionMatching, TransitionError> {
        let rule = self
            .own_rules
            .find(&self.state, to)
            .ok_or_else(|| TransitionError::NoRule {
                from: self.state.name().to_string(),
                to: to.name().to_string(),
            })?;

        let in_agreement = self.in_agreement();
        if rule.matching.permits(in_agreement) {
            return Ok(rule.matching);
        }

        let state = self.state.name().to_string();
        let remote = self.remote_state.name().to_string();
        if in_agreement {
            Err(TransitionError::ServerClientStateMatch { state, remote })
        } else {
            Err(TransitionError::ServerClientStateMismatch { state, remote })
        }
    }

    /// Attempt a local move.
    ///
    /// Guards are not consulted. On failure the local state is unchanged.
    pub fn try_transition(&mut self, to: S) -> Result<(), TransitionError> {
        let matching = self.check_transition(&to)?;

        debug!(
            role = %self.role,
            from = self.state.name(),
            to = to.name(),
            ?matching,
            "local transition"
        );
        self.state = to;
        Ok(())
    }

    /// Perform a local move the caller has already proven legal.
    ///
    /// # Panics
    ///
    /// Panics with the [`TransitionError`] message if the move is refused.
    #[track_caller]
    pub fn set_transition(&mut self, to: S) {
        if let Err(err) = self.try_transition(to) {
            panic!("{err}");
        }
    }

    /// Record the counterpart's newest state and adopt it if permitted.
    ///
    /// The observation always replaces the remote state. The local state
    /// follows only when the counterpart's rules allow `state -> observed`
    /// and no guard bound to that move for this role declines. Never fails;
    /// a refusal just means "not yet".
    pub fn report_remote_state(&mut self, observed: S) -> Absorption {
        self.remote_state = observed;

        let outcome = if self.remote_state == self.state {
            Absorption::Aligned
        } else if !self.remote_rules.permits(&self.state, &self.remote_state) {
            Absorption::NoRemoteRule
        } else if self
            .guards
            .iter()
            .find(|guard| guard.covers(&self.state, &self.remote_state))
            .is_some_and(|guard| !guard.check())
        {
            Absorption::GuardDeclined
        } else {
            Absorption::Absorbed
        };

        if outcome.is_absorbed() {
            debug!(
                role = %self.role,
                from = self.state.name(),
                observed = self.remote_state.name(),
                "absorbed remote state"
            );
            self.state = self.remote_state.clone();
        } else {
            trace!(
                role = %self.role,
                state = self.state.name(),
                observed = self.remote_state.name(),
                ?outcome,
                "remote state recorded"
            );
        }

        outcome
    }

    /// Adopt the last observed remote state unconditionally.
    pub fn follow_remote(&mut self) {
        debug!(
            role = %self.role,
            from = self.state.name(),
            to = self.remote_state.name(),
            "following remote state"
        );
        self.state = self.remote_state.clone();
    }

    /// Set the local state without consulting any rule.
    pub fn force_state(&mut self, state: S) {
        debug!(
            role = %self.role,
            from = self.state.name(),
            to = state.name(),
            "forced state"
        );
        self.state = state;
    }

    /// Force the timeout fallback, if a policy is configured.
    ///
    /// Called by an external scheduler once it decides the deadline from
    /// [`timeout`](Self::timeout) has passed. Returns the state forced.
    pub fn apply_timeout(&mut self) -> Option<S> {
        let fallback = self.timeout.as_ref()?.fallback.clone();
        self.force_state(fallback.clone());
        Some(fallback)
    }

    /// Capture role and both state slots.
    pub fn snapshot(&self) -> MachineSnapshot<S> {
        MachineSnapshot::new(self.role, self.state.clone(), self.remote_state.clone())
    }

    /// Restore both state slots from a snapshot of the same role.
    pub fn restore(&mut self, snapshot: &MachineSnapshot<S>) -> Result<(), SnapshotError> {
        if snapshot.role != self.role {
            return Err(SnapshotError::RoleMismatch {
                expected: self.role,
                found: snapshot.role,
            });
        }

        self.state = snapshot.state.clone();
        self.remote_state = snapshot.remote_state.clone();
        Ok(())
    }
}
