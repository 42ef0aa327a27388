use serde::{Deserialize, Serialize};

/// Уникальный идентификатор сущности в документе
pub type EntityId = String;

/// Идентификатор определения (содержимого группы или компонента)
pub type DefinitionId = String;

/// Имя слоя (тега)
pub type LayerId = String;

/// Слой по умолчанию, на котором лежат все сущности без явного слоя
pub const DEFAULT_LAYER: &str = "Layer0";

fn default_true() -> bool {
    true
}

fn default_version() -> u32 {
    1
}

fn default_layer() -> LayerId {
    DEFAULT_LAYER.to_string()
}

/// Тип сущности
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    /// Группа: контейнер с собственным уникальным определением
    Group { definition: DefinitionId },
    /// Экземпляр компонента: контейнер, разделяющий определение с другими экземплярами
    ComponentInstance { definition: DefinitionId },
    /// Простая геометрия (рёбра, грани), не контейнер
    Geometry,
}

impl EntityKind {
    /// Определение контейнера (None для геометрии)
    pub fn definition(&self) -> Option<&DefinitionId> {
        match self {
            EntityKind::Group { definition } | EntityKind::ComponentInstance { definition } => {
                Some(definition)
            }
            EntityKind::Geometry => None,
        }
    }

    /// Является ли сущность группой или компонентом
    pub fn is_container(&self) -> bool {
        self.definition().is_some()
    }
}

/// Сущность сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Имя сущности (отображается в статусе и логах)
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: EntityKind,
    /// Флаг скрытия самой сущности
    #[serde(default)]
    pub hidden: bool,
    /// Слой, на котором лежит сущность
    #[serde(default = "default_layer")]
    pub layer: LayerId,
}

impl Entity {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

/// Определение: список сущностей внутри группы или компонента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: DefinitionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entities: Vec<EntityId>,
}

/// Слой (тег) с флагом видимости
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: LayerId,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Модель документа: плоский список сущностей, корень и определения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneModel {
    /// Версия формата
    #[serde(default = "default_version")]
    pub version: u32,
    /// Имя документа
    #[serde(default)]
    pub name: String,
    /// Все сущности документа
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Сущности верхнего уровня (корень документа)
    #[serde(default)]
    pub root: Vec<EntityId>,
    /// Определения групп и компонентов
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Слои документа
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Настройка «скрыть остальную модель» при редактировании вложенной геометрии
    #[serde(default)]
    pub hide_rest_of_model: bool,
}

impl SceneModel {
    /// Найти сущность по ID
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Найти сущность по ID (mutable)
    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Найти определение по ID
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Сущности внутри контейнера, либо корень документа при `None`.
    /// Для не-контейнеров и неизвестных ID пустой список.
    pub fn children_of(&self, parent: Option<&str>) -> &[EntityId] {
        match parent {
            None => &self.root,
            Some(id) => self
                .entity(id)
                .and_then(|e| e.kind.definition())
                .and_then(|def| self.definition(def))
                .map(|def| def.entities.as_slice())
                .unwrap_or(&[]),
        }
    }

    /// Видим ли слой. Неизвестный слой считается видимым.
    pub fn layer_visible(&self, layer: &str) -> bool {
        self.layers
            .iter()
            .find(|l| l.name == layer)
            .map(|l| l.visible)
            .unwrap_or(true)
    }

    /// Проверка ссылочной целостности: все ID в корне и определениях существуют,
    /// у каждого контейнера есть определение.
    pub fn validate(&self) -> Result<(), String> {
        for id in &self.root {
            if self.entity(id).is_none() {
                return Err(format!("Unknown root entity: {id}"));
            }
        }
        for def in &self.definitions {
            for id in &def.entities {
                if self.entity(id).is_none() {
                    return Err(format!("Unknown entity {id} in definition {}", def.id));
                }
            }
        }
        for entity in &self.entities {
            if let Some(def) = entity.kind.definition() {
                if self.definition(def).is_none() {
                    return Err(format!(
                        "Entity {} refers to unknown definition {def}",
                        entity.id
                    ));
                }
            }
        }
        Ok(())
    }
}
