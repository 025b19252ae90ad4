/// One step into an inspected value: a member name or an element position.
///
/// [`OpaqueValue::get`](crate::OpaqueValue::get) and
/// [`OpaqueValue::get_path`](crate::OpaqueValue::get_path) take anything that
/// converts into a step, so paths can be written as `["core_", "elems"]` or
/// mixed as `[Step::Field("m_data"), Step::Element(0)]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Step<'a> {
    Field(&'a str),
    Element(usize),
}

impl<'a> From<&'a str> for Step<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Step::Field(name)
    }
}

impl<'a> From<&'a String> for Step<'a> {
    #[inline]
    fn from(name: &'a String) -> Self {
        Step::Field(name)
    }
}

impl From<usize> for Step<'_> {
    #[inline]
    fn from(index: usize) -> Self {
        Step::Element(index)
    }
}
