//! Morphological sequence operations
//!
//! Composed operators are expressed as explicit pipelines of the two
//! primitives (dilation and erosion) instead of nested calls. A
//! [`MorphSequence`] is an ordered list of [`Stage`]s, each consuming the
//! full output of an earlier stage (or the source), plus an optional final
//! [`Difference`] of two intermediate images.
//!
//! | op        | stages                         | difference           |
//! |-----------|--------------------------------|----------------------|
//! | dilate    | `D`                            |                      |
//! | erode     | `E`                            |                      |
//! | open      | `E`, `D`                       |                      |
//! | close     | `D`, `E`                       |                      |
//! | gradient  | `D` (source), `E` (source)     | stage 0 - stage 1    |
//! | top-hat   | `E`, `D`                       | source - stage 1     |
//! | black-hat | `D`, `E`                       | stage 1 - source     |
//!
//! # Sequence String Format
//!
//! Operations are separated by `+` and whitespace is ignored. Each
//! operation is one case-insensitive token:
//!
//! - `d` - Dilation
//! - `e` - Erosion
//! - `o` - Opening (erosion then dilation)
//! - `c` - Closing (dilation then erosion)
//! - `g` - Gradient (dilation - erosion)
//! - `tw` - White tophat (source - opening)
//! - `tb` - Black tophat (closing - source)
//!
//! # Examples
//!
//! ```
//! use pixfilter_core::{PixelGrid, Rgb};
//! use pixfilter_morph::{MorphOp, Sel, morph_sequence, parse_sequence};
//!
//! let ops = parse_sequence("o + tw").unwrap();
//! assert_eq!(ops, vec![MorphOp::Open, MorphOp::TopHat]);
//!
//! let pix = PixelGrid::filled(8, 8, Rgb::gray(40)).unwrap();
//! let out = morph_sequence(&pix, &Sel::cross(), "e + d").unwrap();
//! assert!(out.equals(&pix));
//! ```

use crate::color::{dilate, erode};
use crate::{MorphError, MorphResult, Sel};
use pixfilter_core::grid::clamp_coord;
use pixfilter_core::{PixelGrid, Rgb};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A morphological operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Per-channel maximum over the sel
    Dilate,
    /// Per-channel minimum over the sel
    Erode,
    /// Erosion followed by dilation (removes small bright features)
    Open,
    /// Dilation followed by erosion (fills small dark features)
    Close,
    /// Dilation minus erosion (highlights edges)
    Gradient,
    /// Source minus opening (extracts small bright features)
    TopHat,
    /// Closing minus source (extracts small dark features)
    BlackHat,
}

impl MorphOp {
    /// All operators, in declaration order.
    pub const ALL: [MorphOp; 7] = [
        MorphOp::Dilate,
        MorphOp::Erode,
        MorphOp::Open,
        MorphOp::Close,
        MorphOp::Gradient,
        MorphOp::TopHat,
        MorphOp::BlackHat,
    ];

    /// Short name used for output files.
    pub fn name(&self) -> &'static str {
        match self {
            MorphOp::Dilate => "dilation",
            MorphOp::Erode => "erosion",
            MorphOp::Open => "opening",
            MorphOp::Close => "closing",
            MorphOp::Gradient => "gradient",
            MorphOp::TopHat => "tophat",
            MorphOp::BlackHat => "blackhat",
        }
    }

    /// Token used in sequence strings.
    pub fn token(&self) -> &'static str {
        match self {
            MorphOp::Dilate => "d",
            MorphOp::Erode => "e",
            MorphOp::Open => "o",
            MorphOp::Close => "c",
            MorphOp::Gradient => "g",
            MorphOp::TopHat => "tw",
            MorphOp::BlackHat => "tb",
        }
    }

    /// Expand the operator into its primitive pipeline.
    pub fn sequence(&self) -> MorphSequence {
        use Primitive::{Dilate, Erode};
        let chained = |primitives: &[Primitive], difference| MorphSequence {
            difference,
            ..MorphSequence::chain(primitives)
        };
        match self {
            MorphOp::Dilate => MorphSequence::chain(&[Dilate]),
            MorphOp::Erode => MorphSequence::chain(&[Erode]),
            MorphOp::Open => MorphSequence::chain(&[Erode, Dilate]),
            MorphOp::Close => MorphSequence::chain(&[Dilate, Erode]),
            MorphOp::Gradient => MorphSequence {
                stages: vec![
                    Stage::new(Dilate, StageInput::Source),
                    Stage::new(Erode, StageInput::Source),
                ],
                difference: Some(Difference::new(Operand::Stage(0), Operand::Stage(1))),
            },
            MorphOp::TopHat => chained(
                &[Erode, Dilate],
                Some(Difference::new(Operand::Source, Operand::Stage(1))),
            ),
            MorphOp::BlackHat => chained(
                &[Dilate, Erode],
                Some(Difference::new(Operand::Stage(1), Operand::Source)),
            ),
        }
    }

    /// Apply the operator to an image.
    pub fn apply(&self, pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
        self.sequence().apply(pix, sel)
    }

    /// Output of the operator at a single pixel.
    pub fn apply_at(&self, pix: &PixelGrid, sel: &Sel, x: u32, y: u32) -> Rgb {
        self.sequence().apply_at(pix, sel, x, y)
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for MorphOp {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let token: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match token.as_str() {
            "d" => Ok(MorphOp::Dilate),
            "e" => Ok(MorphOp::Erode),
            "o" => Ok(MorphOp::Open),
            "c" => Ok(MorphOp::Close),
            "g" => Ok(MorphOp::Gradient),
            "tw" => Ok(MorphOp::TopHat),
            "tb" => Ok(MorphOp::BlackHat),
            "" => Err(MorphError::InvalidSequence("empty operation".to_string())),
            t if t.starts_with('t') => Err(MorphError::InvalidSequence(format!(
                "invalid tophat operation '{t}', expected 'tw' or 'tb'"
            ))),
            t => Err(MorphError::InvalidSequence(format!(
                "unknown operation '{t}'"
            ))),
        }
    }
}

/// A primitive morphological step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Dilate,
    Erode,
}

/// Where a stage reads its input from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageInput {
    /// The image the sequence was applied to
    Source,
    /// The output of the preceding stage (the source for the first stage)
    Previous,
}

/// One primitive applied to one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub primitive: Primitive,
    pub input: StageInput,
}

impl Stage {
    pub fn new(primitive: Primitive, input: StageInput) -> Self {
        Stage { primitive, input }
    }
}

/// An image available to the final difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Source,
    /// Output of the stage at this index
    Stage(usize),
}

/// Clamped per-channel `minuend - subtrahend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difference {
    pub minuend: Operand,
    pub subtrahend: Operand,
}

impl Difference {
    pub fn new(minuend: Operand, subtrahend: Operand) -> Self {
        Difference {
            minuend,
            subtrahend,
        }
    }
}

/// An explicit morphological pipeline
///
/// Every [`Operand::Stage`] in the difference refers to an existing stage;
/// this is checked when the difference is attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MorphSequence {
    stages: Vec<Stage>,
    difference: Option<Difference>,
}

impl MorphSequence {
    /// Create an empty sequence (the identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitives applied one after another, each to the previous output.
    pub fn chain(primitives: &[Primitive]) -> Self {
        MorphSequence {
            stages: primitives
                .iter()
                .map(|&p| Stage::new(p, StageInput::Previous))
                .collect(),
            difference: None,
        }
    }

    /// Append a stage.
    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Attach the final difference.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSequence`] if an operand names a stage
    /// that does not exist.
    pub fn with_difference(mut self, difference: Difference) -> MorphResult<Self> {
        for operand in [difference.minuend, difference.subtrahend] {
            if let Operand::Stage(i) = operand {
                if i >= self.stages.len() {
                    return Err(MorphError::InvalidSequence(format!(
                        "difference refers to stage {i}, sequence has {} stages",
                        self.stages.len()
                    )));
                }
            }
        }
        self.difference = Some(difference);
        Ok(self)
    }

    /// Get the stages
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Get the final difference, if any
    pub fn difference(&self) -> Option<Difference> {
        self.difference
    }

    /// Get the number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the sequence has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the pipeline over the whole image.
    ///
    /// Stages execute strictly in order; each sees the complete output of
    /// the image it reads from.
    pub fn apply(&self, pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
        let mut outputs: Vec<PixelGrid> = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            let input = match stage.input {
                StageInput::Source => pix,
                StageInput::Previous => outputs.last().unwrap_or(pix),
            };
            let out = match stage.primitive {
                Primitive::Dilate => dilate(input, sel),
                Primitive::Erode => erode(input, sel),
            };
            outputs.push(out);
        }

        let operand = |op: Operand| match op {
            Operand::Source => pix,
            Operand::Stage(i) => &outputs[i],
        };

        match self.difference {
            Some(diff) => Ok(operand(diff.minuend).subtract_clamped(operand(diff.subtrahend))?),
            None => Ok(outputs.last().unwrap_or(pix).clone()),
        }
    }

    /// Evaluate the pipeline at a single pixel.
    ///
    /// Intermediate images are never built: each stage is evaluated only at
    /// the positions the following stage samples, with the same
    /// clamp-to-edge rule, so the result equals `apply(..)` at (x, y).
    pub fn apply_at(&self, pix: &PixelGrid, sel: &Sel, x: u32, y: u32) -> Rgb {
        let (x, y) = (x as i64, y as i64);
        let operand = |op: Operand| match op {
            Operand::Source => pix.get(x, y),
            Operand::Stage(i) => self.stage_at(pix, sel, i, x, y),
        };

        match self.difference {
            Some(diff) => operand(diff.minuend).saturating_sub(operand(diff.subtrahend)),
            None => match self.stages.len() {
                0 => pix.get(x, y),
                n => self.stage_at(pix, sel, n - 1, x, y),
            },
        }
    }

    /// Output of stage `i` at (x, y), clamped into the image.
    fn stage_at(&self, pix: &PixelGrid, sel: &Sel, i: usize, x: i64, y: i64) -> Rgb {
        let x = clamp_coord(x, pix.width()) as i64;
        let y = clamp_coord(y, pix.height()) as i64;
        let stage = self.stages[i];

        let input = |sx: i64, sy: i64| match stage.input {
            StageInput::Previous if i > 0 => self.stage_at(pix, sel, i - 1, sx, sy),
            _ => pix.get(sx, sy),
        };
        let taps = sel
            .hit_offsets()
            .map(|(dx, dy)| input(x + dx as i64, y + dy as i64));

        match stage.primitive {
            Primitive::Dilate => taps.fold(Rgb::BLACK, Rgb::max),
            Primitive::Erode => taps.fold(Rgb::WHITE, Rgb::min),
        }
    }
}

/// Parse a sequence string into its operators.
///
/// # Errors
///
/// Returns [`MorphError::InvalidSequence`] for an empty string, an empty
/// operation between two `+`, or an unknown token.
pub fn parse_sequence(sequence: &str) -> MorphResult<Vec<MorphOp>> {
    if sequence.trim().is_empty() {
        return Err(MorphError::InvalidSequence("empty sequence".to_string()));
    }

    sequence
        .split('+')
        .enumerate()
        .map(|(i, part)| {
            if part.trim().is_empty() {
                return Err(MorphError::InvalidSequence(format!(
                    "empty operation at position {}",
                    i + 1
                )));
            }
            part.parse()
        })
        .collect()
}

/// Execute a morphological sequence on an image
///
/// Each operator consumes the full output of the previous one.
///
/// # Examples
///
/// ```
/// use pixfilter_core::PixelGrid;
/// use pixfilter_morph::{Sel, morph_sequence};
///
/// let pix = PixelGrid::new(16, 16).unwrap();
/// let result = morph_sequence(&pix, &Sel::cross(), "o + c").unwrap();
/// assert_eq!(result.dimensions(), (16, 16));
/// ```
pub fn morph_sequence(pix: &PixelGrid, sel: &Sel, sequence: &str) -> MorphResult<PixelGrid> {
    let ops = parse_sequence(sequence)?;
    debug!(sequence, ops = ops.len(), "morph sequence");

    let mut result = pix.clone();
    for op in &ops {
        result = op.apply(&result, sel)?;
    }
    Ok(result)
}

/// Opening: erosion followed by dilation.
pub fn open(pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
    MorphOp::Open.apply(pix, sel)
}

/// Closing: dilation followed by erosion.
pub fn close(pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
    MorphOp::Close.apply(pix, sel)
}

/// Morphological gradient: dilation minus erosion.
pub fn gradient(pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
    MorphOp::Gradient.apply(pix, sel)
}

/// White top-hat: source minus opening.
pub fn top_hat(pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
    MorphOp::TopHat.apply(pix, sel)
}

/// Black-hat: closing minus source.
pub fn black_hat(pix: &PixelGrid, sel: &Sel) -> MorphResult<PixelGrid> {
    MorphOp::BlackHat.apply(pix, sel)
}
