//! [`DiceExpression`] travels through serde as its notation string.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::DiceExpression;

impl Serialize for DiceExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&DiceExpression::serialize(self))
    }
}

impl<'de> Deserialize<'de> for DiceExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(NotationVisitor)
    }
}

struct NotationVisitor;

impl<'de> de::Visitor<'de> for NotationVisitor {
    type Value = DiceExpression;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("dice notation like \"2d6+1\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        DiceExpression::parse(v).map_err(E::custom)
    }
}
