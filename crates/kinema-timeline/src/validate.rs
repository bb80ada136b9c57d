//! Structural validation of a finished scene.
//!
//! [`Script`] already fails fast while a scene is being authored; this
//! module re-checks the same invariants on a [`Scene`] value, which is what
//! `kinema check` runs and what protects against scenes deserialized from
//! JSON rather than built through the script API.
//!
//! [`Script`]: crate::script::Script

use std::collections::HashSet;

use crate::scene::Scene;
use crate::timeline::Entry;
use kinema_core::KinemaError;

/// Validate a scene. Returns every violation found, not just the first.
pub fn validate_scene(scene: &Scene) -> Result<(), Vec<KinemaError>> {
    let mut errors = Vec::new();

    let mut declared = HashSet::new();
    for primitive in &scene.primitives {
        if !declared.insert(primitive.id.as_str()) {
            errors.push(KinemaError::script(
                &scene.id,
                format!("duplicate primitive id '{}'", primitive.id),
            ));
        }
    }

    let mut live: HashSet<&str> = HashSet::new();
    let mut retired: HashSet<&str> = HashSet::new();

    for (entry_index, entry) in scene.timeline.entries.iter().enumerate() {
        if !entry.duration().is_valid() {
            errors.push(KinemaError::InvalidDuration {
                scene: scene.id.clone(),
                entry: entry_index,
                seconds: entry.duration().as_seconds(),
            });
        }

        let Entry::Play(batch) = entry else {
            continue;
        };

        if batch.directives.is_empty() {
            errors.push(KinemaError::EmptyBatch {
                scene: scene.id.clone(),
                entry: entry_index,
            });
        }

        for directive in &batch.directives {
            let id = directive.target.as_str();
            if !declared.contains(id) {
                errors.push(KinemaError::UnknownPrimitive {
                    scene: scene.id.clone(),
                    id: id.to_string(),
                });
                continue;
            }
            if directive.op.introduces() {
                if retired.contains(id) {
                    errors.push(KinemaError::AlreadyRetired {
                        scene: scene.id.clone(),
                        id: id.to_string(),
                    });
                } else if !live.insert(id) {
                    errors.push(KinemaError::script(
                        &scene.id,
                        format!("primitive '{}' is introduced twice", id),
                    ));
                }
            } else if directive.op.retires() {
                if live.remove(id) {
                    retired.insert(id);
                } else {
                    errors.push(KinemaError::NotYetCreated {
                        scene: scene.id.clone(),
                        id: id.to_string(),
                    });
                }
            } else if !live.contains(id) {
                errors.push(if retired.contains(id) {
                    KinemaError::AlreadyRetired {
                        scene: scene.id.clone(),
                        id: id.to_string(),
                    }
                } else {
                    KinemaError::NotYetCreated {
                        scene: scene.id.clone(),
                        id: id.to_string(),
                    }
                });
            }
        }
    }

    if !live.is_empty() {
        let mut ids: Vec<String> = live.iter().map(|s| s.to_string()).collect();
        ids.sort();
        errors.push(KinemaError::LeakedPrimitives {
            scene: scene.id.clone(),
            ids,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
