//! Builder for constructing coupled server/client machines.

use crate::builder::error::BuildError;
use crate::core::{
    RemoteGuard, Role, RuleTable, State, TimeoutPolicy, TransitionMatching, TransitionRule,
};
use crate::peer::PeerMachine;
use std::sync::Arc;
use std::time::Duration;

/// Builder for a pair of peer machines with a fluent API.
///
/// One declarative rule set yields both roles: the server's own rules are
/// the client's remote rules and vice versa. Rule and guard lists are
/// shared by reference with every machine built; registering more rules
/// after a build copies the lists, so built machines never see the change.
///
/// # Example
///
/// ```rust
/// use rapport::builder::PeerMachineBuilder;
/// use rapport::peer::sync;
/// use rapport::state_enum;
///
/// state_enum! {
///     enum Round {
///         Idle,
///         Running,
///     }
/// }
///
/// let builder = PeerMachineBuilder::new().server_permit(Round::Idle, Round::Running);
/// let (mut server, mut client) = builder.build_pair();
///
/// server.set_transition(Round::Running);
/// sync(&mut server, &mut client);
///
/// assert_eq!(client.state(), &Round::Running);
/// ```
#[derive(Clone, Debug)]
pub struct PeerMachineBuilder<S: State> {
    server_rules: Arc<RuleTable<S>>,
    client_rules: Arc<RuleTable<S>>,
    server_guards: Arc<Vec<RemoteGuard<S>>>,
    client_guards: Arc<Vec<RemoteGuard<S>>>,
    initial_server: S,
    initial_client: S,
    server_timeout: Option<TimeoutPolicy<S>>,
    client_timeout: Option<TimeoutPolicy<S>>,
}

impl<S: State + Default> PeerMachineBuilder<S> {
    /// Create a new builder with both roles starting at `S::default()`.
    pub fn new() -> Self {
        Self::starting_at(S::default(), S::default())
    }
}

impl<S: State + Default> Default for PeerMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> PeerMachineBuilder<S> {
    /// Create a new builder with explicit initial states.
    pub fn starting_at(server: S, client: S) -> Self {
        Self {
            server_rules: Arc::new(RuleTable::new()),
            client_rules: Arc::new(RuleTable::new()),
            server_guards: Arc::new(Vec::new()),
            client_guards: Arc::new(Vec::new()),
            initial_server: server,
            initial_client: client,
            server_timeout: None,
            client_timeout: None,
        }
    }

    /// Permit the server to move `from -> to` while both sides agree.
    pub fn server_permit(self, from: S, to: S) -> Self {
        self.permit(Role::Server, from, to, TransitionMatching::default())
    }

    /// Permit the server to move `from -> to` under an explicit policy.
    pub fn server_permit_with(self, from: S, to: S, matching: TransitionMatching) -> Self {
        self.permit(Role::Server, from, to, matching)
    }

    /// Permit the client to move `from -> to` while both sides agree.
    pub fn client_permit(self, from: S, to: S) -> Self {
        self.permit(Role::Client, from, to, TransitionMatching::default())
    }

    /// Permit the client to move `from -> to` under an explicit policy.
    pub fn client_permit_with(self, from: S, to: S, matching: TransitionMatching) -> Self {
        self.permit(Role::Client, from, to, matching)
    }

    /// Append a rule to `role`'s own rule list. Duplicates are kept.
    pub fn permit(mut self, role: Role, from: S, to: S, matching: TransitionMatching) -> Self {
        let table = match role {
            Role::Server => &mut self.server_rules,
            Role::Client => &mut self.client_rules,
        };
        Arc::make_mut(table).push(TransitionRule::new(from, to, matching));
        self
    }

    /// Gate the server's absorption of a client move `from -> to`.
    pub fn server_guard<F>(self, from: S, to: S, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard(Role::Server, from, to, predicate)
    }

    /// Gate the client's absorption of a server move `from -> to`.
    pub fn client_guard<F>(self, from: S, to: S, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard(Role::Client, from, to, predicate)
    }

    /// Bind a guard to `role`'s own guard list.
    pub fn guard<F>(mut self, role: Role, from: S, to: S, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        let guards = match role {
            Role::Server => &mut self.server_guards,
            Role::Client => &mut self.client_guards,
        };
        Arc::make_mut(guards).push(RemoteGuard::new(from, to, predicate));
        self
    }

    pub fn initial_server(mut self, state: S) -> Self {
        self.initial_server = state;
        self
    }

    pub fn initial_client(mut self, state: S) -> Self {
        self.initial_client = state;
        self
    }

    /// Record a deadline and fallback for server machines.
    pub fn server_timeout(mut self, after: Duration, fallback: S) -> Self {
        self.server_timeout = Some(TimeoutPolicy::new(after, fallback));
        self
    }

    /// Record a deadline and fallback for client machines.
    pub fn client_timeout(mut self, after: Duration, fallback: S) -> Self {
        self.client_timeout = Some(TimeoutPolicy::new(after, fallback));
        self
    }

    pub fn server_rules(&self) -> &RuleTable<S> {
        &self.server_rules
    }

    pub fn client_rules(&self) -> &RuleTable<S> {
        &self.client_rules
    }

    /// Build a fresh server machine. May be called any number of times.
    pub fn build_server(&self) -> PeerMachine<S> {
        PeerMachine::new(
            Role::Server,
            self.initial_server.clone(),
            Arc::clone(&self.server_rules),
            Arc::clone(&self.client_rules),
            Arc::clone(&self.server_guards),
            self.server_timeout.clone(),
        )
    }

    /// Build a fresh client machine. May be called any number of times.
    pub fn build_client(&self) -> PeerMachine<S> {
        PeerMachine::new(
            Role::Client,
            self.initial_client.clone(),
            Arc::clone(&self.client_rules),
            Arc::clone(&self.server_rules),
            Arc::clone(&self.client_guards),
            self.client_timeout.clone(),
        )
    }

    /// Build a `(server, client)` pair.
    pub fn build_pair(&self) -> (PeerMachine<S>, PeerMachine<S>) {
        (self.build_server(), self.build_client())
    }

    /// Check the rule set for duplicate rules and unreachable guards.
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), BuildError> {
        check_duplicates(Role::Server, &self.server_rules)?;
        check_duplicates(Role::Client, &self.client_rules)?;
        check_guards(Role::Server, &self.server_guards, &self.client_rules)?;
        check_guards(Role::Client, &self.client_guards, &self.server_rules)?;
        Ok(())
    }
}

fn check_duplicates<S: State>(role: Role, table: &RuleTable<S>) -> Result<(), BuildError> {
    let rules = table.rules();
    for (index, rule) in rules.iter().enumerate() {
        if rules[..index]
            .iter()
            .any(|earlier| earlier.covers(&rule.from, &rule.to))
        {
            return Err(BuildError::DuplicateRule {
                role,
                from: rule.from.name().to_string(),
                to: rule.to.name().to_string(),
            });
        }
    }
    Ok(())
}

// A guard is only consulted when the counterpart's rules permit the move.
fn check_guards<S: State>(
    role: Role,
    guards: &[RemoteGuard<S>],
    remote_rules: &RuleTable<S>,
) -> Result<(), BuildError> {
    match guards
        .iter()
        .find(|guard| !remote_rules.permits(&guard.from, &guard.to))
    {
        Some(guard) => Err(BuildError::GuardWithoutRule {
            role,
            from: guard.from.name().to_string(),
            to: guard.to.name().to_string(),
        }),
        None => Ok(()),
    }
}
