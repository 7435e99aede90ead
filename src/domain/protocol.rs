//! Typed view over `protocol.json`.
//!
//! The document is kept as raw JSON inside the version bundles and parsed on
//! demand with [`ProtocolData::from_json`]. A type definition is either the
//! string `native`, another string naming an aliased type, or a
//! `[kind, data]` pair.

use crate::utils::error::{MinebaseError, Result};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayCount {
    Fixed(u64),
    /// Name of a sibling field holding the count.
    Field(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub count_type: Option<String>,
    pub count: Option<ArrayCount>,
    pub element: Box<ProtocolType>,
}

/// One named slice of a packed integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitfieldField {
    pub name: String,
    pub size: u32,
    pub signed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitflagsFlags {
    /// Bit positions assigned from 0 in list order.
    Sequential(Vec<String>),
    /// Flag name to bit mask.
    Masks(BTreeMap<String, u64>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitflagsType {
    pub base: String,
    pub flags: BitflagsFlags,
    pub big: bool,
}

impl BitflagsType {
    pub fn mask_of(&self, flag: &str) -> Option<u64> {
        match &self.flags {
            BitflagsFlags::Sequential(names) => names
                .iter()
                .position(|n| n == flag)
                .and_then(|pos| 1u64.checked_shl(pos as u32)),
            BitflagsFlags::Masks(masks) => masks.get(flag).copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferLength {
    Prefixed(String),
    Fixed(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedField {
    pub name: String,
    pub ty: ProtocolType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContainerField {
    Named(NamedField),
    /// Inlined into the parent container.
    Anonymous(ProtocolType),
}

impl ContainerField {
    pub fn name(&self) -> Option<&str> {
        match self {
            ContainerField::Named(f) => Some(&f.name),
            ContainerField::Anonymous(_) => None,
        }
    }

    pub fn ty(&self) -> &ProtocolType {
        match self {
            ContainerField::Named(f) => &f.ty,
            ContainerField::Anonymous(ty) => ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapperType {
    pub base: String,
    /// Raw keys are decimal or `0x` hex strings.
    pub mappings: BTreeMap<String, String>,
}

impl MapperType {
    pub fn name_for(&self, code: i64) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(key, _)| parse_mapper_key(key) == Some(code))
            .map(|(_, name)| name.as_str())
    }
}

pub fn parse_mapper_key(key: &str) -> Option<i64> {
    let key = key.trim();
    match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => key.parse().ok(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchType {
    pub compare_to: String,
    pub fields: BTreeMap<String, ProtocolType>,
    pub default: Option<Box<ProtocolType>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolType {
    Native,
    Alias(String),
    Array(ArrayType),
    Bitfield(Vec<BitfieldField>),
    Bitflags(BitflagsType),
    Buffer(BufferLength),
    Container(Vec<ContainerField>),
    EntityMetadataLoop {
        end_val: i64,
        element: Box<ProtocolType>,
    },
    Mapper(MapperType),
    Pstring {
        count_type: String,
        /// UTF-8 when absent.
        encoding: Option<String>,
    },
    Option(Box<ProtocolType>),
    Switch(SwitchType),
    RegistryEntryHolder {
        base_name: String,
        otherwise: Box<NamedField>,
    },
    RegistryEntryHolderSet {
        base: Box<NamedField>,
        otherwise: Box<NamedField>,
    },
    EntityMetadataItem {
        compare_to: String,
    },
    ParticleData {
        compare_to: String,
    },
    /// Holds the length of the field named by `count_for`.
    Count {
        base: String,
        count_for: String,
    },
    Encapsulated {
        length_type: String,
        inner: String,
    },
}

impl ProtocolType {
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolType::Native => "native",
            ProtocolType::Alias(_) => "alias",
            ProtocolType::Array(_) => "array",
            ProtocolType::Bitfield(_) => "bitfield",
            ProtocolType::Bitflags(_) => "bitflags",
            ProtocolType::Buffer(_) => "buffer",
            ProtocolType::Container(_) => "container",
            ProtocolType::EntityMetadataLoop { .. } => "entityMetadataLoop",
            ProtocolType::Mapper(_) => "mapper",
            ProtocolType::Pstring { .. } => "pstring",
            ProtocolType::Option(_) => "option",
            ProtocolType::Switch(_) => "switch",
            ProtocolType::RegistryEntryHolder { .. } => "registryEntryHolder",
            ProtocolType::RegistryEntryHolderSet { .. } => "registryEntryHolderSet",
            ProtocolType::EntityMetadataItem { .. } => "entityMetadataItem",
            ProtocolType::ParticleData { .. } => "particleData",
            ProtocolType::Count { .. } => "count",
            ProtocolType::Encapsulated { .. } => "encapsulated",
        }
    }

    /// Parses one raw type definition; `path` names its location for errors.
    pub fn from_json(value: &Value, path: &str) -> Result<ProtocolType> {
        match value {
            Value::String(s) if s == "native" => Ok(ProtocolType::Native),
            Value::String(s) => Ok(ProtocolType::Alias(s.clone())),
            Value::Array(pair) if pair.len() == 2 => {
                let kind = pair[0]
                    .as_str()
                    .ok_or_else(|| invalid(path, "type kind must be a string"))?;
                parse_kind(kind, &pair[1], path)
            }
            _ => Err(invalid(
                path,
                "expected \"native\", an alias name or a [kind, data] pair",
            )),
        }
    }
}

fn invalid(path: &str, message: impl Into<String>) -> MinebaseError {
    MinebaseError::validation(path, message)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn object<'a>(value: &'a Value, path: &str, allowed: &[&str]) -> Result<&'a Map<String, Value>> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid(path, "expected an object"))?;
    if let Some(unknown) = map.keys().find(|k| !allowed.contains(&k.as_str())) {
        return Err(invalid(&join(path, unknown), "unexpected field"));
    }
    Ok(map)
}

fn required<'a>(map: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| invalid(&join(path, key), "missing field"))
}

fn string(value: &Value, path: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(path, "expected a string"))
}

fn opt_string(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    map.get(key)
        .map(|v| string(v, &join(path, key)))
        .transpose()
}

/// A reference to another type by name; `native` is not a valid target.
fn alias(value: &Value, path: &str) -> Result<String> {
    match ProtocolType::from_json(value, path)? {
        ProtocolType::Alias(target) => Ok(target),
        other => Err(invalid(
            path,
            format!("expected a type alias, got {}", other.kind()),
        )),
    }
}

fn opt_alias(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    map.get(key).map(|v| alias(v, &join(path, key))).transpose()
}

fn unsigned(value: &Value, path: &str) -> Result<u64> {
    value
        .as_u64()
        .ok_or_else(|| invalid(path, "expected a non-negative integer"))
}

fn boxed(value: &Value, path: &str) -> Result<Box<ProtocolType>> {
    ProtocolType::from_json(value, path).map(Box::new)
}

fn named_field(value: &Value, path: &str) -> Result<NamedField> {
    let map = object(value, path, &["name", "type", "anon"])?;
    if map.get("anon").and_then(Value::as_bool) == Some(true) {
        return Err(invalid(path, "expected a named field"));
    }
    let name = string(required(map, "name", path)?, &join(path, "name"))?;
    let raw_type = required(map, "type", path)?;
    let ty = match raw_type {
        // bedrock packet_available_commands wraps this alias in a list
        Value::Array(items)
            if items.len() == 1 && items[0] == "enum_size_based_on_values_len" =>
        {
            ProtocolType::Alias("enum_size_based_on_values_len".to_string())
        }
        other => ProtocolType::from_json(other, &join(path, "type"))?,
    };
    Ok(NamedField { name, ty })
}

fn container_field(value: &Value, path: &str) -> Result<ContainerField> {
    let map = object(value, path, &["name", "type", "anon"])?;
    match map.get("anon") {
        Some(Value::Bool(true)) => {
            if map.contains_key("name") {
                return Err(invalid(path, "anonymous field can't have a name"));
            }
            let ty = ProtocolType::from_json(required(map, "type", path)?, &join(path, "type"))?;
            Ok(ContainerField::Anonymous(ty))
        }
        Some(Value::Bool(false)) | None => named_field(value, path).map(ContainerField::Named),
        Some(_) => Err(invalid(&join(path, "anon"), "expected a boolean")),
    }
}

fn parse_kind(kind: &str, data: &Value, path: &str) -> Result<ProtocolType> {
    let path = &join(path, kind);
    match kind {
        "array" => {
            let map = object(data, path, &["countType", "count", "type"])?;
            let count = match map.get("count") {
                None => None,
                Some(Value::String(field)) => Some(ArrayCount::Field(field.clone())),
                Some(v) => Some(ArrayCount::Fixed(unsigned(v, &join(path, "count"))?)),
            };
            Ok(ProtocolType::Array(ArrayType {
                count_type: opt_alias(map, "countType", path)?,
                count,
                element: boxed(required(map, "type", path)?, &join(path, "type"))?,
            }))
        }
        "bitfield" => {
            let items = data
                .as_array()
                .ok_or_else(|| invalid(path, "expected a list of fields"))?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| -> Result<BitfieldField> {
                    let item_path = format!("{path}[{idx}]");
                    let map = object(item, &item_path, &["name", "size", "signed"])?;
                    Ok(BitfieldField {
                        name: string(required(map, "name", &item_path)?, &item_path)?,
                        size: u32::try_from(unsigned(required(map, "size", &item_path)?, &item_path)?)
                            .map_err(|_| invalid(&join(&item_path, "size"), "bit size does not fit in 32 bits"))?,
                        signed: required(map, "signed", &item_path)?
                            .as_bool()
                            .ok_or_else(|| invalid(&join(&item_path, "signed"), "expected a boolean"))?,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(ProtocolType::Bitfield)
        }
        "bitflags" => {
            let map = object(data, path, &["type", "flags", "big"])?;
            let flags_path = join(path, "flags");
            let flags = match required(map, "flags", path)? {
                Value::Array(names) => BitflagsFlags::Sequential(
                    names
                        .iter()
                        .map(|n| string(n, &flags_path))
                        .collect::<Result<_>>()?,
                ),
                Value::Object(masks) => BitflagsFlags::Masks(
                    masks
                        .iter()
                        .map(|(name, mask)| -> Result<(String, u64)> {
                            Ok((name.clone(), unsigned(mask, &join(&flags_path, name))?))
                        })
                        .collect::<Result<_>>()?,
                ),
                _ => return Err(invalid(&flags_path, "expected a list or a name to mask map")),
            };
            let big = match map.get("big") {
                None => false,
                Some(Value::Bool(true)) => true,
                Some(_) => return Err(invalid(&join(path, "big"), "expected true when present")),
            };
            Ok(ProtocolType::Bitflags(BitflagsType {
                base: alias(required(map, "type", path)?, &join(path, "type"))?,
                flags,
                big,
            }))
        }
        "buffer" => {
            let map = object(data, path, &["countType", "count"])?;
            let count_type = opt_alias(map, "countType", path)?;
            let count = map
                .get("count")
                .map(|v| unsigned(v, &join(path, "count")))
                .transpose()?;
            match (count_type, count) {
                (Some(prefix), None) => Ok(ProtocolType::Buffer(BufferLength::Prefixed(prefix))),
                (None, Some(fixed)) => Ok(ProtocolType::Buffer(BufferLength::Fixed(fixed))),
                _ => Err(invalid(
                    path,
                    "buffer needs exactly one of countType and count",
                )),
            }
        }
        "container" => {
            let items = data
                .as_array()
                .ok_or_else(|| invalid(path, "expected a list of fields"))?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| container_field(item, &format!("{path}[{idx}]")))
                .collect::<Result<Vec<_>>>()
                .map(ProtocolType::Container)
        }
        "entityMetadataLoop" => {
            let map = object(data, path, &["endVal", "type"])?;
            Ok(ProtocolType::EntityMetadataLoop {
                end_val: required(map, "endVal", path)?
                    .as_i64()
                    .ok_or_else(|| invalid(&join(path, "endVal"), "expected an integer"))?,
                element: boxed(required(map, "type", path)?, &join(path, "type"))?,
            })
        }
        "mapper" => {
            let map = object(data, path, &["type", "mappings"])?;
            let mappings_path = join(path, "mappings");
            let mappings = required(map, "mappings", path)?
                .as_object()
                .ok_or_else(|| invalid(&mappings_path, "expected an object"))?
                .iter()
                .map(|(key, name)| -> Result<(String, String)> {
                    Ok((key.clone(), string(name, &join(&mappings_path, key))?))
                })
                .collect::<Result<_>>()?;
            Ok(ProtocolType::Mapper(MapperType {
                base: alias(required(map, "type", path)?, &join(path, "type"))?,
                mappings,
            }))
        }
        "pstring" => {
            let map = object(data, path, &["countType", "encoding"])?;
            Ok(ProtocolType::Pstring {
                count_type: alias(required(map, "countType", path)?, &join(path, "countType"))?,
                encoding: opt_string(map, "encoding", path)?,
            })
        }
        "option" => Ok(ProtocolType::Option(boxed(data, path)?)),
        "switch" => {
            let map = object(data, path, &["compareTo", "fields", "default"])?;
            let fields_path = join(path, "fields");
            let fields = required(map, "fields", path)?
                .as_object()
                .ok_or_else(|| invalid(&fields_path, "expected an object"))?
                .iter()
                .map(|(case, ty)| -> Result<(String, ProtocolType)> {
                    Ok((case.clone(), ProtocolType::from_json(ty, &join(&fields_path, case))?))
                })
                .collect::<Result<_>>()?;
            Ok(ProtocolType::Switch(SwitchType {
                compare_to: string(required(map, "compareTo", path)?, &join(path, "compareTo"))?,
                fields,
                default: map
                    .get("default")
                    .map(|v| boxed(v, &join(path, "default")))
                    .transpose()?,
            }))
        }
        "registryEntryHolder" => {
            let map = object(data, path, &["baseName", "otherwise"])?;
            Ok(ProtocolType::RegistryEntryHolder {
                base_name: string(required(map, "baseName", path)?, &join(path, "baseName"))?,
                otherwise: Box::new(named_field(
                    required(map, "otherwise", path)?,
                    &join(path, "otherwise"),
                )?),
            })
        }
        "registryEntryHolderSet" => {
            let map = object(data, path, &["base", "otherwise"])?;
            Ok(ProtocolType::RegistryEntryHolderSet {
                base: Box::new(named_field(required(map, "base", path)?, &join(path, "base"))?),
                otherwise: Box::new(named_field(
                    required(map, "otherwise", path)?,
                    &join(path, "otherwise"),
                )?),
            })
        }
        "entityMetadataItem" | "particleData" => {
            let map = object(data, path, &["compareTo"])?;
            let compare_to = string(required(map, "compareTo", path)?, &join(path, "compareTo"))?;
            Ok(if kind == "particleData" {
                ProtocolType::ParticleData { compare_to }
            } else {
                ProtocolType::EntityMetadataItem { compare_to }
            })
        }
        "count" => {
            let map = object(data, path, &["type", "countFor"])?;
            Ok(ProtocolType::Count {
                base: alias(required(map, "type", path)?, &join(path, "type"))?,
                count_for: string(required(map, "countFor", path)?, &join(path, "countFor"))?,
            })
        }
        "encapsulated" => {
            let map = object(data, path, &["lengthType", "type"])?;
            Ok(ProtocolType::Encapsulated {
                length_type: alias(required(map, "lengthType", path)?, &join(path, "lengthType"))?,
                inner: alias(required(map, "type", path)?, &join(path, "type"))?,
            })
        }
        other => Err(invalid(path, format!("unknown protocol type kind {other:?}"))),
    }
}

fn parse_types(value: &Value, path: &str) -> Result<BTreeMap<String, ProtocolType>> {
    value
        .as_object()
        .ok_or_else(|| invalid(path, "expected an object of type definitions"))?
        .iter()
        .map(|(name, raw)| -> Result<(String, ProtocolType)> {
            Ok((name.clone(), ProtocolType::from_json(raw, &join(path, name))?))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ToClient,
    ToServer,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToClient => "toClient",
            Direction::ToServer => "toServer",
        }
    }
}

/// Packet types of one connection state (`handshaking`, `play`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolState {
    pub to_client: BTreeMap<String, ProtocolType>,
    pub to_server: BTreeMap<String, ProtocolType>,
}

impl ProtocolState {
    pub fn types(&self, direction: Direction) -> &BTreeMap<String, ProtocolType> {
        match direction {
            Direction::ToClient => &self.to_client,
            Direction::ToServer => &self.to_server,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolData {
    pub types: BTreeMap<String, ProtocolType>,
    pub states: BTreeMap<String, ProtocolState>,
}

impl ProtocolData {
    pub fn from_json(value: &Value) -> Result<ProtocolData> {
        let root = value
            .as_object()
            .ok_or_else(|| invalid("", "protocol document must be an object"))?;
        let mut data = ProtocolData::default();
        for (key, section) in root {
            if key == "types" {
                data.types = parse_types(section, "types")?;
                continue;
            }
            let state_map = object(section, key, &["toClient", "toServer"])?;
            let mut state = ProtocolState::default();
            for direction in [Direction::ToClient, Direction::ToServer] {
                let Some(raw) = state_map.get(direction.as_str()) else {
                    continue;
                };
                let direction_path = join(key, direction.as_str());
                let direction_map = object(raw, &direction_path, &["types"])?;
                let types = match direction_map.get("types") {
                    Some(types) => parse_types(types, &join(&direction_path, "types"))?,
                    None => BTreeMap::new(),
                };
                match direction {
                    Direction::ToClient => state.to_client = types,
                    Direction::ToServer => state.to_server = types,
                }
            }
            data.states.insert(key.clone(), state);
        }
        Ok(data)
    }

    pub fn state(&self, name: &str) -> Option<&ProtocolState> {
        self.states.get(name)
    }

    pub fn packet(&self, state: &str, direction: Direction, name: &str) -> Option<&ProtocolType> {
        self.state(state)?.types(direction).get(name)
    }

    /// Follows an alias chain from `name` to the first non-alias definition.
    ///
    /// Returns `None` when a name is undefined or the chain loops.
    pub fn resolve_alias(&self, name: &str) -> Option<&ProtocolType> {
        let mut seen = HashSet::new();
        let mut current = name;
        loop {
            if !seen.insert(current) {
                return None;
            }
            match self.types.get(current)? {
                ProtocolType::Alias(target) => current = target,
                resolved => return Some(resolved),
            }
        }
    }
}
