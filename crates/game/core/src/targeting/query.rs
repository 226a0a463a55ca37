use crate::error::TargetingError;
use crate::grid::{Anchor, Coordinate, GridMetric, SelfSquare};
use crate::scene::{Character, Disposition, EntityIndex, EntityResolver, PlacedEntity};

/// Which dispositions a query keeps once geometric membership is known.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FactionFilter {
    /// Every creature, regardless of disposition.
    #[default]
    #[strum(to_string = "all", serialize = "creatures")]
    All,
    /// Same disposition as the acting character.
    Allies,
    /// Any disposition other than the acting character's.
    Enemies,
}

/// Where a power measures from and how far it reaches.
///
/// Queries are plain values: every builder method consumes the query and
/// returns an updated copy, so a query handed to the picker or to
/// [`evaluate`](Self::evaluate) can never be altered behind its back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetQuery {
    origins: Vec<Anchor>,
    range: u32,
    radius: u32,
    faction: FactionFilter,
    acting: Option<Disposition>,
    self_square: SelfSquare,
}

impl TargetQuery {
    /// Query measured from the given points, with range 0, radius 0 and no
    /// faction filter.
    pub fn from_origin(coords: impl IntoIterator<Item = Coordinate>) -> Self {
        Self::from_anchors(coords.into_iter().map(Anchor::Point))
    }

    pub fn from_anchors(origins: impl IntoIterator<Item = Anchor>) -> Self {
        Self {
            origins: origins.into_iter().collect(),
            range: 0,
            radius: 0,
            faction: FactionFilter::All,
            acting: None,
            self_square: SelfSquare::Exclude,
        }
    }

    pub fn from_point(point: Coordinate) -> Self {
        Self::from_origin([point])
    }

    /// Query measured from every token of `character` in the scene, acting
    /// with the character's disposition.
    ///
    /// Falls back to the character's own token when the index holds none of
    /// its tokens.
    pub fn from_character(character: &Character, index: &EntityIndex<'_>) -> Self {
        let mut origins: Vec<Anchor> = index.tokens_of(&character.actor).map(Anchor::from).collect();
        if origins.is_empty() {
            origins.push(Anchor::from(character));
        }

        let mut query = Self::from_anchors(origins);
        query.acting = Some(character.disposition);
        query
    }

    // ===== builders =====

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the faction filter and the disposition it is relative to.
    ///
    /// With `acting = None` the filter has nothing to compare against and
    /// degrades to [`FactionFilter::All`].
    #[must_use]
    pub fn with_faction(mut self, filter: FactionFilter, acting: Option<Disposition>) -> Self {
        self.faction = filter;
        self.acting = acting;
        self
    }

    /// Keeps the current acting disposition and only swaps the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FactionFilter) -> Self {
        self.faction = filter;
        self
    }

    #[must_use]
    pub fn with_self_square(mut self, self_square: SelfSquare) -> Self {
        self.self_square = self_square;
        self
    }

    // ===== accessors =====

    pub fn origins(&self) -> &[Anchor] {
        &self.origins
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn faction(&self) -> FactionFilter {
        self.faction
    }

    pub fn acting_disposition(&self) -> Option<Disposition> {
        self.acting
    }

    pub fn self_square(&self) -> SelfSquare {
        self.self_square
    }

    /// The filter actually applied during evaluation.
    pub fn effective_faction(&self) -> FactionFilter {
        match self.acting {
            Some(_) => self.faction,
            None => FactionFilter::All,
        }
    }

    /// The only origin of a point-pick query.
    pub fn single_origin(&self) -> Result<Coordinate, TargetingError> {
        match self.origins.as_slice() {
            [origin] => Ok(origin.position()),
            origins => Err(TargetingError::InvalidOriginCount {
                count: origins.len(),
            }),
        }
    }

    /// Returns true if `point` is a legal pick from the single origin.
    pub fn accepts_pick(&self, point: Coordinate, metric: &GridMetric) -> Result<bool, TargetingError> {
        let origin = self.single_origin()?;
        Ok(metric.is_within(origin, point, self.range))
    }

    /// Query produced by an accepted pick at `point`.
    ///
    /// Range, radius and faction carry over. The picked square itself is
    /// part of the area, so the origin square is included.
    #[must_use]
    pub fn anchored_at(&self, point: Coordinate) -> Self {
        Self {
            origins: vec![Anchor::Point(point)],
            self_square: SelfSquare::Include,
            ..self.clone()
        }
    }

    // ===== evaluation =====

    /// Placed tokens inside the area that pass the faction filter, in scene
    /// order and before actor deduplication.
    ///
    /// Distance is decided first on faction-agnostic positions; the faction
    /// filter only ever narrows the geometric match set.
    pub fn candidates<'a>(&self, index: &EntityIndex<'a>) -> Vec<&'a PlacedEntity> {
        let metric = index.metric();
        let filter = self.effective_faction();

        index
            .all_entities()
            .iter()
            .filter(|entity| {
                let target = Anchor::from(*entity);
                self.origins.iter().any(|origin| {
                    metric.is_anchor_within(origin, &target, self.radius, self.self_square)
                })
            })
            .filter(|entity| match (filter, self.acting) {
                (FactionFilter::Allies, Some(acting)) => entity.disposition == acting,
                (FactionFilter::Enemies, Some(acting)) => entity.disposition != acting,
                _ => true,
            })
            .collect()
    }

    /// Logical actors inside the area, each reported once.
    pub fn evaluate(&self, index: &EntityIndex<'_>) -> Vec<Character> {
        let candidates = self.candidates(index);
        let characters = EntityResolver::dedupe(candidates.iter().copied());

        tracing::debug!(
            origins = self.origins.len(),
            radius = self.radius,
            faction = %self.effective_faction(),
            tokens = candidates.len(),
            actors = characters.len(),
            "evaluated target query"
        );

        characters
    }
}
