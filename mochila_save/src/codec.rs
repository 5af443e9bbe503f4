use crate::save_file::SavedInstance;
use mochila_scene::{Scene, Template};
use mochila_structs::{Quaternion, Vector3};
use uuid::Uuid;

/// What came out of restoring one instance. `orphans` lists the snapshot
/// store ids that found no counterpart in the freshly instantiated subtree;
/// one entry per missing identifier. Orphans are expected when the template
/// changed between save and load and never abort the rest of the instance.
#[derive(Debug)]
pub struct RestoreOutcome {
    pub root: Uuid,
    pub orphans: Vec<Uuid>,
}

/// Capture one placed instance: its template reference, local transform and
/// the state of every variable store anywhere in its subtree (identifiers
/// are assigned here if still missing). Returns `None` when the node has no
/// template reference; such children are skipped, not errored.
pub fn capture(scene: &mut Scene, instance_root: Uuid) -> Option<SavedInstance> {
    let node = scene.node(instance_root)?;
    let template = node.template_ref.clone()?;
    let position = node.position;
    let rotation = node.rotation;

    let mut stores = Vec::new();
    for node_id in scene.subtree_stores(instance_root) {
        if let Some(sys) = scene.node_mut(node_id).and_then(|n| n.vars.as_mut()) {
            stores.push(sys.save());
        }
    }

    Some(SavedInstance {
        template,
        position: [position.x, position.y, position.z],
        rotation: rotation.to_array(),
        stores,
    })
}

/// Re-create one instance from its snapshot: instantiate the (already
/// resolved) template under `parent`, apply the captured transform verbatim,
/// then re-bind each store snapshot to the store in the new subtree carrying
/// the same identifier. Matched stores get `declare()` then `load()`; an
/// incomplete load (schema drift) is logged and the rest of the instance
/// still processes.
pub fn restore(
    scene: &mut Scene,
    saved: &SavedInstance,
    template: &Template,
    parent: Uuid,
) -> RestoreOutcome {
    let root = template.instantiate(scene, parent);
    scene.set_transform(
        root,
        Vector3::new(saved.position[0], saved.position[1], saved.position[2]),
        Quaternion::from_array(saved.rotation),
    );

    let mut orphans = Vec::new();
    for snapshot in &saved.stores {
        match scene.find_store(root, snapshot.id) {
            Some(node_id) => {
                if let Some(sys) = scene.node_mut(node_id).and_then(|n| n.vars.as_mut()) {
                    sys.declare();
                    if let Err(e) = sys.load(snapshot) {
                        log::warn!("store {} restored incomplete: {e}", snapshot.id);
                    }
                }
            }
            None => {
                log::warn!(
                    "orphan snapshot: no store with id {} in subtree of `{}`",
                    snapshot.id,
                    saved.template
                );
                orphans.push(snapshot.id);
            }
        }
    }

    RestoreOutcome { root, orphans }
}
