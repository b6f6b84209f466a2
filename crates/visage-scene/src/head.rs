//! Head mesh resolution
//!
//! The head is the skinned mesh that carries a usable morph dictionary and
//! whose name looks like a head. Exact well-known names beat a substring
//! match; within a tier, the first node in load order wins.

use visage_core::MorphChannels;

use crate::{NodeIndex, NodeKind, Scene};

/// Names used by common avatar exporters
pub const HEAD_EXACT_NAMES: &[&str] = &["Wolf3D_Head", "Head_Mesh"];

/// Non-owning handle to the head mesh node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeadMeshRef(pub NodeIndex);

/// How a candidate matched the naming heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadMatch {
    Exact,
    Substring,
}

impl HeadMatch {
    /// Classify a node name, `None` when it does not look like a head
    pub fn classify(name: &str) -> Option<HeadMatch> {
        if HEAD_EXACT_NAMES.contains(&name) {
            Some(HeadMatch::Exact)
        } else if name.to_lowercase().contains("head") {
            Some(HeadMatch::Substring)
        } else {
            None
        }
    }
}

impl HeadMeshRef {
    /// Find the best head candidate in `scene`
    pub fn resolve(scene: &Scene) -> Option<HeadMeshRef> {
        let mut best: Option<(HeadMatch, NodeIndex)> = None;

        for (index, node) in scene.nodes() {
            let NodeKind::Mesh(mesh) = &node.kind else {
                continue;
            };
            if !mesh.has_morphs() {
                continue;
            }
            let Some(rank) = HeadMatch::classify(&node.name) else {
                continue;
            };
            if best.map_or(true, |(current, _)| rank < current) {
                best = Some((rank, index));
            }
            if rank == HeadMatch::Exact {
                break;
            }
        }

        match best {
            Some((rank, index)) => {
                tracing::debug!(
                    node = index.0,
                    name = scene.node(index).map(|n| n.name.as_str()).unwrap_or(""),
                    ?rank,
                    "head mesh resolved"
                );
                Some(HeadMeshRef(index))
            }
            None => {
                tracing::debug!("no head mesh with morph channels; facial animation disabled");
                None
            }
        }
    }

    /// Morph channels of the referenced mesh
    pub fn morphs_mut<'a>(&self, scene: &'a mut Scene) -> Option<&'a mut MorphChannels> {
        scene
            .mesh_mut(self.0)?
            .morphs
            .as_mut()
            .filter(|m| !m.is_empty())
    }

    pub fn morphs<'a>(&self, scene: &'a Scene) -> Option<&'a MorphChannels> {
        scene.mesh(self.0)?.morphs.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkinnedMesh;

    fn morph_mesh() -> SkinnedMesh {
        SkinnedMesh::with_morphs(MorphChannels::new(["jawOpen", "mouthFunnel"]).unwrap())
    }

    #[test]
    fn test_exact_beats_substring() {
        let mut scene = Scene::new();
        scene.add_mesh("AvatarHead_LOD0", None, morph_mesh()).unwrap();
        let exact = scene.add_mesh("Wolf3D_Head", None, morph_mesh()).unwrap();

        assert_eq!(HeadMeshRef::resolve(&scene), Some(HeadMeshRef(exact)));
    }

    #[test]
    fn test_substring_case_insensitive() {
        let mut scene = Scene::new();
        scene.add_mesh("Body", None, morph_mesh()).unwrap();
        let head = scene.add_mesh("character_HEAD", None, morph_mesh()).unwrap();

        assert_eq!(HeadMeshRef::resolve(&scene), Some(HeadMeshRef(head)));
    }

    #[test]
    fn test_first_exact_wins() {
        let mut scene = Scene::new();
        let first = scene.add_mesh("Head_Mesh", None, morph_mesh()).unwrap();
        scene.add_mesh("Wolf3D_Head", None, morph_mesh()).unwrap();

        assert_eq!(HeadMeshRef::resolve(&scene), Some(HeadMeshRef(first)));
    }

    #[test]
    fn test_requires_morphs() {
        let mut scene = Scene::new();
        scene.add_mesh("Wolf3D_Head", None, SkinnedMesh::rigid()).unwrap();
        scene
            .add_mesh("Head_Mesh", None, SkinnedMesh::with_morphs(MorphChannels::default()))
            .unwrap();
        scene.add_bone("Head", None).unwrap();

        assert_eq!(HeadMeshRef::resolve(&scene), None);
    }

    #[test]
    fn test_morphs_mut() {
        let mut scene = Scene::new();
        scene.add_mesh("Wolf3D_Head", None, morph_mesh()).unwrap();

        let head = HeadMeshRef::resolve(&scene).unwrap();
        head.morphs_mut(&mut scene).unwrap().set("jawOpen", 0.2);
        assert_eq!(head.morphs(&scene).unwrap().get("jawOpen"), Some(0.2));
    }
}
