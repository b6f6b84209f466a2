//! Scene graph arena

use visage_core::{MorphChannels, Rotation3, VisageError, VisageResult};

/// Index of a node in its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// Skinned mesh; the morph dictionary is optional in real assets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinnedMesh {
    pub morphs: Option<MorphChannels>,
}

impl SkinnedMesh {
    /// Mesh without morph targets
    pub fn rigid() -> Self {
        Self { morphs: None }
    }

    pub fn with_morphs(morphs: MorphChannels) -> Self {
        Self {
            morphs: Some(morphs),
        }
    }

    /// True when the mesh exposes at least one morph channel
    pub fn has_morphs(&self) -> bool {
        self.morphs.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Skeleton bone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bone {
    pub rotation: Rotation3,
}

/// What a node carries
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(SkinnedMesh),
    Bone(Bone),
}

/// Named node with an optional parent
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeIndex>,
    pub kind: NodeKind,
}

/// Flat node arena in load order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeIndex>,
        kind: NodeKind,
    ) -> VisageResult<NodeIndex> {
        if let Some(p) = parent {
            if p.0 >= self.nodes.len() {
                return Err(VisageError::UnknownNode(p.0));
            }
        }
        self.nodes.push(SceneNode {
            name: name.into(),
            parent,
            kind,
        });
        Ok(NodeIndex(self.nodes.len() - 1))
    }

    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeIndex>,
    ) -> VisageResult<NodeIndex> {
        self.push(name, parent, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeIndex>,
        mesh: SkinnedMesh,
    ) -> VisageResult<NodeIndex> {
        self.push(name, parent, NodeKind::Mesh(mesh))
    }

    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeIndex>,
    ) -> VisageResult<NodeIndex> {
        self.push(name, parent, NodeKind::Bone(Bone::default()))
    }

    pub fn node(&self, index: NodeIndex) -> Option<&SceneNode> {
        self.nodes.get(index.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn mesh(&self, index: NodeIndex) -> Option<&SkinnedMesh> {
        match &self.nodes.get(index.0)?.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, index: NodeIndex) -> Option<&mut SkinnedMesh> {
        match &mut self.nodes.get_mut(index.0)?.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn bone(&self, index: NodeIndex) -> Option<&Bone> {
        match &self.nodes.get(index.0)?.kind {
            NodeKind::Bone(bone) => Some(bone),
            _ => None,
        }
    }

    pub fn bone_mut(&mut self, index: NodeIndex) -> Option<&mut Bone> {
        match &mut self.nodes.get_mut(index.0)?.kind {
            NodeKind::Bone(bone) => Some(bone),
            _ => None,
        }
    }

    /// First node with exactly this name
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_scene() {
        let mut scene = Scene::new();
        let root = scene.add_group("Armature", None).unwrap();
        let head = scene
            .add_mesh(
                "Wolf3D_Head",
                Some(root),
                SkinnedMesh::with_morphs(MorphChannels::new(["jawOpen"]).unwrap()),
            )
            .unwrap();
        let arm = scene.add_bone("LeftArm", Some(root)).unwrap();

        assert_eq!(scene.len(), 3);
        assert!(scene.mesh(head).unwrap().has_morphs());
        assert!(scene.mesh(arm).is_none());
        assert!(scene.bone(arm).is_some());
        assert_eq!(scene.find("LeftArm"), Some(arm));
        assert_eq!(scene.node(head).unwrap().parent, Some(root));
    }

    #[test]
    fn test_unknown_parent() {
        let mut scene = Scene::new();
        let err = scene.add_group("orphan", Some(NodeIndex(4))).unwrap_err();
        assert_eq!(err, VisageError::UnknownNode(4));
    }

    #[test]
    fn test_empty_morphs_do_not_count() {
        let mesh = SkinnedMesh::with_morphs(MorphChannels::default());
        assert!(!mesh.has_morphs());
        assert!(!SkinnedMesh::rigid().has_morphs());
    }
}
