/// Chat id (numeric) identifying one notification recipient.
///
/// Assigned by the messaging platform; equality is exact integer equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);
