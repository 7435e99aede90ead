//! Crafting recipes. Java keys recipe lists by result item id; Bedrock keys
//! individual recipes by a numeric id and carries NBT on its items.

use crate::utils::error::{MinebaseError, Result};
use crate::utils::validation::{validate_each, validate_field, validate_min, validate_min_len, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Java

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaRecipeResult {
    pub id: i64,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<i64>,
}

/// An ingredient; the data writes a bare id when there is no metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawIngredient")]
pub struct JavaRecipeIngredient {
    pub id: i64,
    pub metadata: Option<i64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IngredientFields {
    id: i64,
    #[serde(default)]
    metadata: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Id(i64),
    Item(IngredientFields),
}

impl From<RawIngredient> for JavaRecipeIngredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Id(id) => JavaRecipeIngredient { id, metadata: None },
            RawIngredient::Item(f) => JavaRecipeIngredient {
                id: f.id,
                metadata: f.metadata,
            },
        }
    }
}

/// Crafting grid rows; `None` is an empty slot.
pub type RecipeShape = Vec<Vec<Option<JavaRecipeIngredient>>>;

fn validate_shape(field: &str, shape: &RecipeShape) -> Result<()> {
    if shape.is_empty() || shape.len() > 3 {
        return Err(MinebaseError::validation(
            field,
            format!("a shape must have 1 to 3 rows, got {}", shape.len()),
        ));
    }
    let row_len = shape[0].len();
    if row_len == 0 || row_len > 3 {
        return Err(MinebaseError::validation(
            field,
            format!("a shape row must have 1 to 3 slots, got {row_len}"),
        ));
    }
    if shape.iter().any(|row| row.len() != row_len) {
        return Err(MinebaseError::validation(
            field,
            "all rows of a shape must have the same length",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JavaShapedRecipe {
    pub result: JavaRecipeResult,
    pub in_shape: RecipeShape,
    /// What stays in the grid after crafting (the empty bucket of a cake).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_shape: Option<RecipeShape>,
}

impl Validate for JavaShapedRecipe {
    fn validate(&self) -> Result<()> {
        validate_shape("inShape", &self.in_shape)?;
        if let Some(out_shape) = &self.out_shape {
            validate_shape("outShape", out_shape)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JavaShapelessRecipe {
    pub result: JavaRecipeResult,
    pub ingredients: Vec<JavaRecipeIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JavaRecipe {
    Shaped(JavaShapedRecipe),
    Shapeless(JavaShapelessRecipe),
}

impl JavaRecipe {
    pub fn result(&self) -> &JavaRecipeResult {
        match self {
            JavaRecipe::Shaped(r) => &r.result,
            JavaRecipe::Shapeless(r) => &r.result,
        }
    }

    /// Ingredients with gaps removed, in grid order for shaped recipes.
    pub fn ingredients(&self) -> Vec<JavaRecipeIngredient> {
        match self {
            JavaRecipe::Shaped(r) => r.in_shape.iter().flatten().flatten().copied().collect(),
            JavaRecipe::Shapeless(r) => r.ingredients.clone(),
        }
    }
}

impl Validate for JavaRecipe {
    fn validate(&self) -> Result<()> {
        match self {
            JavaRecipe::Shaped(r) => r.validate(),
            JavaRecipe::Shapeless(r) => validate_min_len("ingredients", &r.ingredients, 1),
        }
    }
}

/// Result item id to every recipe producing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JavaRecipesData(pub BTreeMap<i64, Vec<JavaRecipe>>);

impl JavaRecipesData {
    pub fn recipes_for(&self, item_id: i64) -> &[JavaRecipe] {
        self.0.get(&item_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for JavaRecipesData {
    fn validate(&self) -> Result<()> {
        for (item_id, recipes) in &self.0 {
            validate_each(&item_id.to_string(), recipes)?;
        }
        Ok(())
    }
}

// Bedrock

/// A Bedrock NBT tag in its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase", deny_unknown_fields)]
pub enum Nbt {
    Compound(BTreeMap<String, Nbt>),
    Byte(u8),
    List(NbtList),
    Int(i32),
    ByteArray(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase", deny_unknown_fields)]
pub enum NbtList {
    Compound(Vec<BTreeMap<String, Nbt>>),
    /// An empty list; the payload is always `[]`.
    End(Vec<serde_json::Value>),
}

fn validate_compound(compound: &BTreeMap<String, Nbt>) -> Result<()> {
    for (name, tag) in compound {
        validate_field(name, tag)?;
    }
    Ok(())
}

impl Validate for Nbt {
    fn validate(&self) -> Result<()> {
        match self {
            Nbt::Compound(compound) => validate_compound(compound),
            Nbt::List(NbtList::End(values)) if !values.is_empty() => Err(
                MinebaseError::validation("", "an end-typed list must be empty"),
            ),
            Nbt::List(NbtList::Compound(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    validate_compound(item).map_err(|e| e.nested(&format!("[{idx}]")))?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// The root compound, which carries a (always empty) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootCompoundNbt {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub value: BTreeMap<String, Nbt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockRootNbt {
    pub version: u8,
    pub nbt: RootCompoundNbt,
}

impl Validate for BedrockRootNbt {
    fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MinebaseError::validation(
                "version",
                format!("unsupported NBT version {}", self.version),
            ));
        }
        if self.nbt.kind != "compound" {
            return Err(MinebaseError::validation(
                "nbt.type",
                "root tag must be a compound",
            ));
        }
        if !self.nbt.name.is_empty() {
            return Err(MinebaseError::validation(
                "nbt.name",
                "root compound must have an empty name",
            ));
        }
        validate_compound(&self.nbt.value).map_err(|e| e.nested("nbt.value"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockRecipeItem {
    /// `minecraft:planks`, ...
    pub name: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<BedrockRootNbt>,
}

impl Validate for BedrockRecipeItem {
    fn validate(&self) -> Result<()> {
        validate_min("count", self.count, 1)?;
        validate_field("nbt", &self.nbt)
    }
}

/// Crafting or processing station a recipe applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedrockRecipeType {
    Multi,
    CartographyTable,
    Stonecutter,
    CraftingTable,
    CraftingTableShapeless,
    ShulkerBox,
    Furnace,
    BlastFurnace,
    Smoker,
    SoulCampfire,
    Campfire,
    SmithingTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BedrockRecipeData {
    /// Unique.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BedrockRecipeType,
    pub ingredients: Vec<BedrockRecipeItem>,
    /// Shaped grid of 1-based ingredient indexes; 0 is a gap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Vec<Vec<u32>>>,
    pub output: Vec<BedrockRecipeItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl BedrockRecipeData {
    /// The ingredient placed at `(row, col)` of a shaped recipe.
    pub fn ingredient_at(&self, row: usize, col: usize) -> Option<&BedrockRecipeItem> {
        let index = *self.input.as_ref()?.get(row)?.get(col)?;
        match index {
            0 => None,
            n => self.ingredients.get(n as usize - 1),
        }
    }
}

impl Validate for BedrockRecipeData {
    fn validate(&self) -> Result<()> {
        validate_min_len("ingredients", &self.ingredients, 1)?;
        validate_each("ingredients", &self.ingredients)?;
        validate_min_len("output", &self.output, 1)?;
        validate_each("output", &self.output)?;
        if let Some(priority) = self.priority {
            if priority != 0 {
                return Err(MinebaseError::validation(
                    "priority",
                    format!("expected 0, got {priority}"),
                ));
            }
        }
        if let Some(input) = &self.input {
            let max = self.ingredients.len();
            if input.iter().flatten().any(|&idx| idx as usize > max) {
                return Err(MinebaseError::validation(
                    "input",
                    "recipe input shape references unknown ingredients",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BedrockRecipesData(pub BTreeMap<i64, BedrockRecipeData>);

impl BedrockRecipesData {
    pub fn by_name(&self, name: &str) -> Option<&BedrockRecipeData> {
        self.0.values().find(|r| r.name == name)
    }

    pub fn of_type(&self, kind: BedrockRecipeType) -> impl Iterator<Item = &BedrockRecipeData> {
        self.0.values().filter(move |r| r.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for BedrockRecipesData {
    fn validate(&self) -> Result<()> {
        for (id, recipe) in &self.0 {
            validate_field(&id.to_string(), recipe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_java_recipes_shaped_and_shapeless() {
        let data: JavaRecipesData = serde_json::from_value(json!({
            "5": [
                {"inShape": [[17]], "result": {"count": 4, "id": 5, "metadata": 0}},
                {"ingredients": [{"id": 17, "metadata": 1}], "result": {"count": 4, "id": 5}}
            ],
            "280": [
                {"inShape": [[5], [5]], "result": {"count": 4, "id": 280}}
            ],
            "354": [{
                "inShape": [[335, 335, 335], [353, 344, 353], [296, 296, 296]],
                "outShape": [[325, 325, 325], [null, null, null], [null, null, null]],
                "result": {"count": 1, "id": 354}
            }]
        }))
        .unwrap();
        assert!(data.validate().is_ok());
        assert_eq!(data.len(), 4);

        let planks = data.recipes_for(5);
        assert!(matches!(planks[0], JavaRecipe::Shaped(_)));
        match &planks[1] {
            JavaRecipe::Shapeless(r) => assert_eq!(r.ingredients[0].metadata, Some(1)),
            other => panic!("unexpected recipe: {other:?}"),
        }
        assert_eq!(data.recipes_for(354)[0].ingredients().len(), 9);
        assert!(data.recipes_for(1).is_empty());
    }

    #[test]
    fn test_java_shape_rules() {
        let ragged: JavaRecipe = serde_json::from_value(json!({
            "inShape": [[1, 2], [3]],
            "result": {"count": 1, "id": 9}
        }))
        .unwrap();
        assert!(ragged.validate().is_err());

        let too_wide: JavaRecipe = serde_json::from_value(json!({
            "inShape": [[1, 2, 3, 4]],
            "result": {"count": 1, "id": 9}
        }))
        .unwrap();
        assert!(too_wide.validate().is_err());

        let empty: JavaRecipe = serde_json::from_value(json!({
            "ingredients": [],
            "result": {"count": 1, "id": 9}
        }))
        .unwrap();
        assert!(empty.validate().is_err());
    }

    fn bedrock_recipe() -> serde_json::Value {
        json!({
            "name": "minecraft:stick",
            "type": "multi",
            "ingredients": [{"name": "minecraft:planks", "count": 1, "metadata": 32767}],
            "input": [[1], [1]],
            "output": [{
                "name": "minecraft:stick",
                "count": 4,
                "nbt": {
                    "version": 1,
                    "nbt": {
                        "type": "compound",
                        "name": "",
                        "value": {
                            "Damage": {"type": "int", "value": 0},
                            "Fireworks": {"type": "compound", "value": {
                                "Explosions": {"type": "list", "value": {"type": "end", "value": []}},
                                "Flight": {"type": "byte", "value": 1}
                            }},
                            "Colors": {"type": "byteArray", "value": [1, 2]}
                        }
                    }
                }
            }],
            "priority": 0
        })
    }

    #[test]
    fn test_bedrock_recipe_with_nbt() {
        let data: BedrockRecipesData =
            serde_json::from_value(json!({"12": bedrock_recipe()})).unwrap();
        assert!(data.validate().is_ok());
        let recipe = data.by_name("minecraft:stick").unwrap();
        assert_eq!(recipe.ingredient_at(1, 0).unwrap().name, "minecraft:planks");
        assert_eq!(data.of_type(BedrockRecipeType::Multi).count(), 1);
    }

    #[test]
    fn test_bedrock_recipe_rules() {
        let mut value = bedrock_recipe();
        value["input"] = json!([[2]]);
        let recipe: BedrockRecipeData = serde_json::from_value(value).unwrap();
        assert!(recipe.validate().is_err());

        let mut value = bedrock_recipe();
        value["output"][0]["nbt"]["nbt"]["value"]["Fireworks"]["value"]["Explosions"]["value"]
            ["value"] = json!([1]);
        let recipe: BedrockRecipeData = serde_json::from_value(value).unwrap();
        match recipe.validate().unwrap_err() {
            MinebaseError::ValidationError { path, .. } => assert_eq!(
                path,
                "output[0].nbt.nbt.value.Fireworks.Explosions"
            ),
            other => panic!("unexpected error: {other:?}"),
        }

        let mut value = bedrock_recipe();
        value["output"][0]["nbt"]["nbt"]["name"] = json!("root");
        let recipe: BedrockRecipeData = serde_json::from_value(value).unwrap();
        assert!(recipe.validate().is_err());

        let mut value = bedrock_recipe();
        value["type"] = json!("loom");
        assert!(serde_json::from_value::<BedrockRecipeData>(value).is_err());
    }
}
