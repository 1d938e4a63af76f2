//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette.
///
/// Interactions are matched on port, method, and input. Concurrent calls
/// complete in any order while recording, so replay looks up the earliest
/// unconsumed interaction with an equal input instead of following `seq`.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Option<Interaction>>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Option<Interaction>>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(Some(interaction.clone()));
        }
        Self { queues }
    }

    /// Take the next unconsumed interaction for `port`/`method` whose input equals `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if no recorded interaction remains for the combination.
    pub fn take_matching(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        queue
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|i| &i.input == input))
            .and_then(Option::take)
            .ok_or_else(|| {
                format!(
                    "exhausted: no unconsumed interaction for port={port:?} method={method:?} \
                     input={input}"
                )
            })
    }
}
