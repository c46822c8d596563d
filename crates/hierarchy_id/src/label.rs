use std::fmt;

use crate::error::LabelOutOfRange;

/// A single level of a [`HierarchyId`](crate::HierarchyId): the position of a
/// node among its siblings.
///
/// Labels are bounded to the non-negative half of the signed 32-bit range so
/// that every label fits in the widest band of the binary encoding. Values
/// outside that range are rejected when the label is built, never at encode
/// time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Label(u32);

impl Label {
    /// The smallest label
    pub const MIN: Label = Label(0);
    /// The largest label, `i32::MAX`
    pub const MAX: Label = Label(i32::MAX as u32);

    /// Construct a label, rejecting values above [`Label::MAX`].
    pub const fn new(value: u32) -> Result<Self, LabelOutOfRange> {
        if value > Self::MAX.0 {
            Err(LabelOutOfRange(value as i128))
        } else {
            Ok(Self(value))
        }
    }

    /// The label as an unsigned integer
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}

impl From<Label> for u32 {
    fn from(l: Label) -> Self {
        l.0
    }
}

impl From<Label> for i64 {
    fn from(l: Label) -> Self {
        l.0 as i64
    }
}

macro_rules! label_try_from {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Label {
                type Error = LabelOutOfRange;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    u32::try_from(v)
                        .ok()
                        .and_then(|v| Label::new(v).ok())
                        .ok_or(LabelOutOfRange(v as i128))
                }
            }
        )*
    };
}

label_try_from!(u32, u64, usize, i32, i64);

#[cfg(any(test, feature = "fuzzing"))]
impl proptest::arbitrary::Arbitrary for Label {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Label>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;
        // Weight toward small labels so every band shows up in generated paths.
        prop_oneof![
            4 => 0u32..8,
            3 => 8u32..72,
            2 => 72u32..1_096,
            1 => 1_096u32..66_632,
            1 => 66_632u32..=Label::MAX.0,
        ]
        .prop_map(Label)
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Label::try_from(-1i64), Err(LabelOutOfRange(-1)));
        assert_eq!(Label::try_from(-7i32), Err(LabelOutOfRange(-7)));
        assert_eq!(
            Label::try_from(i32::MAX as u32 + 1),
            Err(LabelOutOfRange(2_147_483_648))
        );
        assert_eq!(
            Label::try_from(u64::MAX),
            Err(LabelOutOfRange(u64::MAX as i128))
        );
    }

    #[test]
    fn accepts_bounds() {
        assert_eq!(Label::try_from(0i64).unwrap(), Label::MIN);
        assert_eq!(Label::try_from(i32::MAX).unwrap(), Label::MAX);
        assert_eq!(Label::new(42).unwrap().get(), 42);
    }

    #[test]
    fn display() {
        assert_eq!(Label::new(17).unwrap().to_string(), "17");
        assert_eq!(format!("{:?}", Label::MAX), "Label(2147483647)");
    }
}
