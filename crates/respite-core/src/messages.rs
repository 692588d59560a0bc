//! Break messages and the selection pipeline.
//!
//! Each break displays one message from a configurable pool, chosen either
//! uniformly at random or sequentially through a shuffled permutation that
//! visits every message exactly once per cycle. The pipeline performs no
//! persistence itself; sequential selections return the updated rotation
//! state for the caller to write through the settings store.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rotation::{generate_order, sanitize_order};

/// Opaque reference to an image shown alongside a message. Attachment
/// storage itself is an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub path: String,
}

/// One entry in the break message pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakMessage {
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Per-message override of the global break length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl BreakMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
            duration_secs: None,
        }
    }
}

/// Shown when the pool is empty.
pub fn fallback_message() -> BreakMessage {
    BreakMessage::new("Time for a break. Step away from the screen and stretch.")
}

/// How the next message is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Random,
    Sequential,
}

/// Persisted cursor and permutation for sequential mode.
///
/// Stored raw and untrusted: the selector validates on use and silently
/// regenerates when the order is not a permutation of the current pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    #[serde(default)]
    pub next_index: i64,
    #[serde(default)]
    pub order: Vec<i64>,
}

/// Result of one selection.
#[derive(Debug, Clone)]
pub struct Selection {
    pub message: BreakMessage,
    /// Updated rotation state the caller should persist (sequential mode only).
    pub rotation: Option<RotationState>,
}

/// Choose the next message from `pool`.
///
/// Random mode picks uniformly and carries no state. Sequential mode walks a
/// shuffled permutation; once the cursor wraps past the end a fresh
/// permutation is generated, so each full cycle visits every message exactly
/// once, in a new random order per cycle.
pub fn select_next<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[BreakMessage],
    mode: SelectionMode,
    rotation: &RotationState,
) -> Selection {
    if pool.is_empty() {
        return Selection {
            message: fallback_message(),
            rotation: None,
        };
    }

    match mode {
        SelectionMode::Random => Selection {
            message: pool[rng.gen_range(0..pool.len())].clone(),
            rotation: None,
        },
        SelectionMode::Sequential => {
            let n = pool.len();
            // Stale or negative cursors fold into [0, n).
            let cursor = rotation.next_index.rem_euclid(n as i64) as usize;
            let order =
                sanitize_order(&rotation.order, n).unwrap_or_else(|| generate_order(rng, n));
            let message = pool[order[cursor]].clone();
            let (next_index, order) = if cursor + 1 >= n {
                // Cycle complete: reshuffle for the next pass.
                (0, generate_order(rng, n))
            } else {
                (cursor + 1, order)
            };
            Selection {
                message,
                rotation: Some(RotationState {
                    next_index: next_index as i64,
                    order: order.into_iter().map(|v| v as i64).collect(),
                }),
            }
        }
    }
}
