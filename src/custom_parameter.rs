use crate::{
    codecs::{bool_from_plist, float_from_plist, int_from_plist, read_int_list, text_from_plist},
    schema::{parameter_class, ParameterClass},
    GlyphsError,
};
use openstep_plist::{Dictionary, Plist};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The entity a custom parameter belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterOwner {
    #[default]
    Unowned,
    Font,
    /// A master, by id.
    Master(String),
    /// An instance, by name.
    Instance(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    IntList(Vec<i64>),
    Dict(Dictionary),
    List(Vec<Plist>),
    String(String),
}

impl ParameterValue {
    /// Decode a value according to the class its parameter name implies.
    pub fn decode(name: &str, plist: &Plist) -> Result<ParameterValue, GlyphsError> {
        let invalid = |codec| GlyphsError::invalid(codec, plist.to_string());
        Ok(match parameter_class(name) {
            ParameterClass::Integer => ParameterValue::Integer(int_from_plist(plist)?),
            ParameterClass::Float => ParameterValue::Float(float_from_plist(plist)?),
            ParameterClass::Bool => ParameterValue::Bool(bool_from_plist(plist)?),
            ParameterClass::IntList => match plist {
                Plist::Array(items) => ParameterValue::IntList(read_int_list(items)?),
                _ => return Err(invalid("integer list")),
            },
            ParameterClass::Dict => match plist {
                Plist::Dictionary(d) => ParameterValue::Dict(d.clone()),
                // Older files store the table as a quoted plist.
                Plist::String(s) => match Plist::parse(s)? {
                    Plist::Dictionary(d) => ParameterValue::Dict(d),
                    _ => return Err(invalid("dictionary")),
                },
                _ => return Err(invalid("dictionary")),
            },
            ParameterClass::Generic => match plist {
                Plist::Dictionary(d) => ParameterValue::Dict(d.clone()),
                Plist::Array(items) => ParameterValue::List(items.clone()),
                scalar => ParameterValue::String(text_from_plist(scalar).unwrap_or_default()),
            },
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomParameter {
    pub name: SmolStr,
    pub value: ParameterValue,
    #[serde(skip)]
    pub(crate) owner: ParameterOwner,
    #[serde(default, skip_serializing_if = "Dictionary::is_empty")]
    pub other: Dictionary,
}

impl CustomParameter {
    pub fn new(name: impl Into<SmolStr>, value: ParameterValue) -> Self {
        CustomParameter {
            name: name.into(),
            value,
            owner: ParameterOwner::Unowned,
            other: Dictionary::new(),
        }
    }

    pub fn owner(&self) -> &ParameterOwner {
        &self.owner
    }

    fn from_plist(plist: &Plist) -> Result<CustomParameter, GlyphsError> {
        let mismatch = |field: &str, expected, found: &str| GlyphsError::TypeMismatch {
            entity: "GSCustomParameter",
            field: field.to_string(),
            expected,
            found: found.to_string(),
        };
        let dict = plist
            .as_dict()
            .ok_or_else(|| mismatch("<root>", "dictionary", plist.kind()))?;
        let name = match dict.get("name") {
            Some(name) => text_from_plist(name).ok_or_else(|| mismatch("name", "string", name.kind()))?,
            None => return Err(mismatch("name", "string", "nothing")),
        };
        let value = match dict.get("value") {
            Some(value) => ParameterValue::decode(&name, value)?,
            None => return Err(mismatch("value", "value", "nothing")),
        };
        let mut parameter = CustomParameter::new(name, value);
        parameter.other = dict
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "value"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(parameter)
    }
}

/// An ordered list of custom parameters, looked up by name or index.
///
/// Parameters added to the collection take its owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomParameters {
    items: Vec<CustomParameter>,
    #[serde(skip)]
    owner: ParameterOwner,
}

impl CustomParameters {
    pub(crate) fn from_plist(items: &[Plist]) -> Result<CustomParameters, GlyphsError> {
        Ok(CustomParameters {
            items: items
                .iter()
                .map(CustomParameter::from_plist)
                .collect::<Result<_, _>>()?,
            owner: ParameterOwner::Unowned,
        })
    }

    pub fn owner(&self) -> &ParameterOwner {
        &self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: ParameterOwner) {
        for parameter in &mut self.items {
            parameter.owner = owner.clone();
        }
        self.owner = owner;
    }

    pub fn get(&self, name: &str) -> Option<&CustomParameter> {
        self.items.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut CustomParameter> {
        self.items.iter_mut().find(|p| p.name == name)
    }

    /// The value of the first parameter with this name.
    pub fn value(&self, name: &str) -> Option<&ParameterValue> {
        self.get(name).map(|p| &p.value)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&CustomParameter> {
        self.items.get(index)
    }

    /// Replace the value of an existing parameter, or append a new one.
    pub fn set(&mut self, name: &str, value: ParameterValue) {
        match self.get_mut(name) {
            Some(parameter) => parameter.value = value,
            None => self.append(CustomParameter::new(name, value)),
        }
    }

    pub fn append(&mut self, mut parameter: CustomParameter) {
        parameter.owner = self.owner.clone();
        self.items.push(parameter);
    }

    /// Remove the first parameter with this name.
    pub fn remove(&mut self, name: &str) -> Option<CustomParameter> {
        let index = self.items.iter().position(|p| p.name == name)?;
        let mut removed = self.items.remove(index);
        removed.owner = ParameterOwner::Unowned;
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomParameter> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pretty_assertions::assert_eq;

    fn parameter(source: &str) -> Result<CustomParameter, GlyphsError> {
        CustomParameter::from_plist(&Plist::parse(source).unwrap())
    }

    #[test]
    fn values_follow_the_name() {
        assert_eq!(
            parameter("{name = typoAscender; value = 750;}").unwrap().value,
            ParameterValue::Integer(750)
        );
        assert_eq!(
            parameter("{name = postscriptBlueScale; value = \"0.039\";}").unwrap().value,
            ParameterValue::Float(0.039)
        );
        assert_eq!(
            parameter("{name = \"Use Typo Metrics\"; value = 1;}").unwrap().value,
            ParameterValue::Bool(true)
        );
        assert_eq!(
            parameter("{name = fsType; value = (1, \"2\");}").unwrap().value,
            ParameterValue::IntList(vec![1, 2])
        );
        assert_eq!(
            parameter("{name = \"Master Name\"; value = Light;}").unwrap().value,
            ParameterValue::String("Light".into())
        );
        assert_eq!(
            parameter("{name = note; value = 12;}").unwrap().value,
            ParameterValue::String("12".into())
        );
    }

    #[test]
    fn gasp_table_may_be_quoted() {
        let quoted = parameter("{name = \"GASP Table\"; value = \"{8 = 2; 65535 = 15;}\";}").unwrap();
        let inline = parameter("{name = \"GASP Table\"; value = {8 = 2; 65535 = 15;};}").unwrap();
        assert_eq!(quoted.value, inline.value);
        match quoted.value {
            ParameterValue::Dict(d) => assert_eq!(d.get("65535"), Some(&Plist::Integer(15))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(matches!(
            parameter("{name = unitsPerEm; value = big;}"),
            Err(GlyphsError::InvalidLiteral { codec: "integer", .. })
        ));
        assert!(matches!(
            parameter("{name = panose; value = 3;}"),
            Err(GlyphsError::InvalidLiteral { codec: "integer list", .. })
        ));
        assert!(parameter("{value = 3;}").is_err());
    }

    #[test]
    fn collection_operations() {
        let mut parameters = CustomParameters::default();
        parameters.set_owner(ParameterOwner::Master("M1".into()));
        parameters.set("typoAscender", ParameterValue::Integer(700));
        parameters.set("Master Name", ParameterValue::String("Bold".into()));
        parameters.set("typoAscender", ParameterValue::Integer(750));
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.value("typoAscender"), Some(&ParameterValue::Integer(750)));
        assert_eq!(parameters.get_by_index(1).map(|p| p.name.as_str()), Some("Master Name"));
        assert_eq!(
            parameters.get("Master Name").map(|p| p.owner().clone()),
            Some(ParameterOwner::Master("M1".into()))
        );
        let removed = parameters.remove("typoAscender").unwrap();
        assert_eq!(removed.owner(), &ParameterOwner::Unowned);
        assert_eq!(parameters.len(), 1);
        assert!(parameters.remove("typoAscender").is_none());
    }
}
