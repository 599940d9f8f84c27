//! The command catalog and its grammar projection.

use std::collections::HashMap;

use parley_foundation::{Error, ErrorKind, Result};
use parley_grammar::{Grammar, Group, Term, Terminal, argument_tail, rules};

use crate::commands;
use crate::contract::CommandContract;

/// Every command contract known to an interpreter, by keyword.
#[derive(Debug, Default)]
pub struct CommandCatalog {
    contracts: Vec<CommandContract>,
    by_keyword: HashMap<String, usize>,
}

impl CommandCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in commands.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for contract in commands::contracts() {
            let index = catalog.contracts.len();
            catalog.by_keyword.insert(contract.keyword().to_string(), index);
            catalog.contracts.push(contract);
        }
        catalog
    }

    /// Adds a contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyword is already registered or is not a
    /// valid identifier.
    pub fn register(&mut self, contract: CommandContract) -> Result<usize> {
        let keyword = contract.keyword();
        if keyword.is_empty()
            || parley_grammar::terminal::scan_identifier(keyword, 0) != Some(keyword.len())
        {
            return Err(Error::new(ErrorKind::Grammar(format!(
                "invalid command keyword {keyword:?}"
            ))));
        }
        if self.by_keyword.contains_key(keyword) {
            return Err(Error::new(ErrorKind::Grammar(format!(
                "command {keyword} is already registered"
            ))));
        }
        let index = self.contracts.len();
        self.by_keyword.insert(keyword.to_string(), index);
        self.contracts.push(contract);
        Ok(index)
    }

    /// Looks up a contract by keyword.
    #[must_use]
    pub fn find(&self, keyword: &str) -> Option<(usize, &CommandContract)> {
        let index = *self.by_keyword.get(keyword)?;
        Some((index, &self.contracts[index]))
    }

    /// Returns the contract at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommandContract> {
        self.contracts.get(index)
    }

    /// Iterates contracts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandContract> {
        self.contracts.iter()
    }

    /// Returns the number of contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Adds a keyword terminal and a `<keyword>-command` rule for every
    /// contract with a keyword surface, and offers each as an alternative
    /// of `keyword-command`.
    ///
    /// Each rule is the keyword, one separator and argument per
    /// constraint, then any number of further arguments. The tail lets a
    /// command with surplus arguments parse, so the loader can report them.
    ///
    /// # Errors
    ///
    /// Returns an error if `grammar` has no `keyword-command` alternation
    /// or a rule name is already taken.
    pub fn project(&self, grammar: &mut Grammar) -> Result<()> {
        for contract in self.contracts.iter().filter(|c| !c.is_implicit()) {
            let keyword = contract.keyword();
            let terminal = if grammar.contains(keyword) {
                format!("{keyword}-keyword")
            } else {
                keyword.to_string()
            };
            grammar.add_terminal(terminal.clone(), Terminal::keyword(keyword))?;

            let mut rule = Group::ordered([Term::rule(terminal.as_str())]);
            for constraint in contract.arguments() {
                let kinds = Group::any(constraint.kinds().iter().map(|k| Term::rule(k.rule())));
                let pair = Group::ordered([Term::rule(rules::SEPARATOR), kinds.into()]);
                rule.push(if constraint.is_optional() {
                    pair.optional()
                } else {
                    pair
                });
            }
            rule.push(argument_tail());

            let name = format!("{keyword}-command");
            grammar.add_nonterminal(name.clone(), rule)?;
            grammar.push_alternative(rules::KEYWORD_COMMAND, name.as_str())?;
            log::trace!("projected {} as {name} ({terminal})", contract.usage());
        }
        Ok(())
    }

    /// Builds the core grammar extended with this catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if projection fails.
    pub fn grammar(&self) -> Result<Grammar> {
        let mut grammar = Grammar::core();
        self.project(&mut grammar)?;
        Ok(grammar)
    }
}
