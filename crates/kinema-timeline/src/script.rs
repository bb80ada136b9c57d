use std::collections::{HashMap, HashSet};

use crate::animation::{AnimOp, Batch, Directive};
use crate::layout;
use crate::primitive::{Primitive, PrimitiveId};
use crate::registry::Registry;
use crate::scene::{default_viewport, Scene};
use crate::timeline::{Entry, Timeline};
use kinema_core::types::{Axis, Direction};
use kinema_core::{Color, Duration, KinemaError, KinemaResult, Point2D, Rect, Size2D, Style};

/// The scene authoring surface: declares primitives, answers layout
/// queries, and appends animation batches to the timeline.
///
/// The builder enforces the primitive lifecycle while the script runs:
/// an introducing operation (create/fade-in/write) makes its target live, a
/// fade-out retires it permanently, and every other operation requires a
/// live target. [`Script::finish`] refuses to produce a scene that leaks
/// primitives, so every created primitive must be faded out before the
/// scene ends. All violations surface at construction time; a broken
/// script never reaches the renderer.
pub struct Script {
    id: String,
    title: String,
    background: Color,
    viewport: Size2D,
    primitives: Vec<Primitive>,
    index: HashMap<String, usize>,
    registry: Registry,
    retired: HashSet<String>,
    timeline: Timeline,
}

impl Script {
    /// Start a new scene script with the given style. The style sets the
    /// background; everything else about it is the scene author's business.
    pub fn new(id: impl Into<String>, style: &Style) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            background: style.background,
            viewport: default_viewport(),
            primitives: Vec::new(),
            index: HashMap::new(),
            registry: Registry::new(),
            retired: HashSet::new(),
            timeline: Timeline::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn viewport(&self) -> Size2D {
        self.viewport
    }

    /// Declare a primitive. Declaration alone does not make it visible;
    /// it must be introduced by a create/fade-in/write operation.
    pub fn add(&mut self, primitive: Primitive) -> KinemaResult<PrimitiveId> {
        let id = primitive.id.clone();
        if self.index.contains_key(&id.0) {
            return Err(KinemaError::script(
                &self.id,
                format!("duplicate primitive id '{}'", id),
            ));
        }
        self.index.insert(id.0.clone(), self.primitives.len());
        self.primitives.push(primitive);
        Ok(id)
    }

    fn lookup(&self, id: &PrimitiveId) -> KinemaResult<&Primitive> {
        self.index
            .get(&id.0)
            .map(|&i| &self.primitives[i])
            .ok_or_else(|| KinemaError::UnknownPrimitive {
                scene: self.id.clone(),
                id: id.0.clone(),
            })
    }

    /// Bounding box of a declared primitive as currently placed.
    pub fn bounds(&self, id: impl Into<String>) -> KinemaResult<Rect> {
        let id = PrimitiveId::new(id);
        if self.retired.contains(&id.0) {
            return Err(KinemaError::AlreadyRetired {
                scene: self.id.clone(),
                id: id.0,
            });
        }
        Ok(self.lookup(&id)?.bounds())
    }

    /// Center position placing `primitive` beside a declared anchor.
    pub fn next_to(
        &self,
        anchor: impl Into<String>,
        primitive: &Primitive,
        dir: Direction,
        gap: f64,
    ) -> KinemaResult<Point2D> {
        let anchor = self.bounds(anchor)?;
        Ok(layout::beside(
            &anchor,
            primitive.intrinsic_size(),
            dir,
            gap,
        ))
    }

    /// Center position aligning `primitive` with a declared anchor along
    /// one axis.
    pub fn align_to(
        &self,
        anchor: impl Into<String>,
        primitive: &Primitive,
        axis: Axis,
    ) -> KinemaResult<Point2D> {
        let anchor = self.bounds(anchor)?;
        Ok(layout::aligned(&anchor, primitive.position, axis))
    }

    /// Arrange declared primitives in a row or column centered on `center`,
    /// updating their positions in place.
    pub fn arrange(
        &mut self,
        ids: &[&str],
        dir: Direction,
        gap: f64,
        center: Point2D,
    ) -> KinemaResult<()> {
        let mut sizes = Vec::with_capacity(ids.len());
        for id in ids {
            sizes.push(self.lookup(&PrimitiveId::new(*id))?.intrinsic_size());
        }
        let positions = layout::arranged(&sizes, dir, gap, center);
        for (id, pos) in ids.iter().zip(positions) {
            let i = self.index[&id.to_string()];
            self.primitives[i].position = pos;
        }
        Ok(())
    }

    /// Center position pinning `primitive` against a viewport edge.
    pub fn to_edge(&self, primitive: &Primitive, dir: Direction, margin: f64) -> Point2D {
        layout::to_edge(primitive.intrinsic_size(), dir, margin, self.viewport)
    }

    /// Play a batch of concurrent animation operations over a shared
    /// duration. All operations begin and end together; batches execute
    /// strictly in submission order.
    pub fn play(&mut self, directives: Vec<Directive>, duration: Duration) -> KinemaResult<()> {
        let entry = self.timeline.len();
        if directives.is_empty() {
            return Err(KinemaError::EmptyBatch {
                scene: self.id.clone(),
                entry,
            });
        }
        if !duration.is_valid() {
            return Err(KinemaError::InvalidDuration {
                scene: self.id.clone(),
                entry,
                seconds: duration.as_seconds(),
            });
        }

        for directive in &directives {
            self.lookup(&directive.target)?;
            let id = &directive.target;
            let live = self.registry.is_live(id);
            let retired = self.retired.contains(&id.0);

            if directive.op.introduces() {
                if retired {
                    return Err(KinemaError::AlreadyRetired {
                        scene: self.id.clone(),
                        id: id.0.clone(),
                    });
                }
                if live {
                    return Err(KinemaError::script(
                        &self.id,
                        format!("primitive '{}' is introduced twice", id),
                    ));
                }
                self.registry.register(id);
            } else if directive.op.retires() {
                if !live {
                    return Err(if retired {
                        KinemaError::AlreadyRetired {
                            scene: self.id.clone(),
                            id: id.0.clone(),
                        }
                    } else {
                        KinemaError::NotYetCreated {
                            scene: self.id.clone(),
                            id: id.0.clone(),
                        }
                    });
                }
                self.registry.retire(id);
                self.retired.insert(id.0.clone());
            } else if !live {
                return Err(if retired {
                    KinemaError::AlreadyRetired {
                        scene: self.id.clone(),
                        id: id.0.clone(),
                    }
                } else {
                    KinemaError::NotYetCreated {
                        scene: self.id.clone(),
                        id: id.0.clone(),
                    }
                });
            }
        }

        self.timeline
            .push(Entry::Play(Batch::new(directives, duration)));
        Ok(())
    }

    /// Play a single operation.
    pub fn play_one(
        &mut self,
        target: impl Into<String>,
        op: AnimOp,
        duration: Duration,
    ) -> KinemaResult<()> {
        self.play(vec![Directive::new(target, op)], duration)
    }

    /// Advance the clock without mutating any primitive.
    pub fn wait(&mut self, duration: Duration) -> KinemaResult<()> {
        if !duration.is_valid() {
            return Err(KinemaError::InvalidDuration {
                scene: self.id.clone(),
                entry: self.timeline.len(),
                seconds: duration.as_seconds(),
            });
        }
        self.timeline.push(Entry::Wait(duration));
        Ok(())
    }

    /// Fade out every currently live primitive in one batch. The usual way
    /// to close a scene section.
    pub fn fade_out_all(&mut self, duration: Duration) -> KinemaResult<()> {
        let live = self.registry.live_ids();
        if live.is_empty() {
            return Ok(());
        }
        let directives = live
            .into_iter()
            .map(|id| Directive::new(id, AnimOp::FadeOut))
            .collect();
        self.play(directives, duration)
    }

    /// Ids of primitives currently live.
    pub fn live_ids(&self) -> Vec<String> {
        self.registry.live_ids()
    }

    /// Validate the finished script and produce an immutable scene.
    ///
    /// Fails if any primitive is still live: every created primitive must
    /// be retired before the scene ends.
    pub fn finish(self) -> KinemaResult<Scene> {
        if !self.registry.is_empty() {
            return Err(KinemaError::LeakedPrimitives {
                scene: self.id,
                ids: self.registry.live_ids(),
            });
        }
        for primitive in &self.primitives {
            if !self.retired.contains(&primitive.id.0) {
                tracing::debug!(
                    scene = %self.id,
                    primitive = %primitive.id,
                    "declared primitive was never animated"
                );
            }
        }
        Ok(Scene {
            id: self.id,
            title: self.title,
            background: self.background,
            viewport: self.viewport,
            primitives: self.primitives,
            timeline: self.timeline,
        })
    }
}
