// Storage-device hierarchy: the nested payload is flattened into an arena in
// depth-first pre-order with an explicit stack, so a parent always precedes its
// children and deep trees do not grow the call stack.

use sqlx::SqliteConnection;

use crate::models::StorageDeviceData;

/// One device of the flattened tree. `parent` indexes into the same arena.
#[derive(Debug)]
pub(crate) struct FlatDevice<'a> {
    pub(crate) device: &'a StorageDeviceData,
    pub(crate) parent: Option<usize>,
    pub(crate) depth: u32,
    pub(crate) path: String,
}

pub(crate) fn flatten(roots: &[StorageDeviceData]) -> Vec<FlatDevice<'_>> {
    let mut arena: Vec<FlatDevice<'_>> = Vec::new();
    // Reversed pushes keep sibling order on pop.
    let mut stack: Vec<(&StorageDeviceData, Option<usize>)> =
        roots.iter().rev().map(|d| (d, None)).collect();

    while let Some((device, parent)) = stack.pop() {
        let (depth, path) = match parent {
            Some(p) => (arena[p].depth + 1, format!("{}/{}", arena[p].path, device.name)),
            None => (0, format!("/{}", device.name)),
        };
        let idx = arena.len();
        arena.push(FlatDevice {
            device,
            parent,
            depth,
            path,
        });
        for child in device.partitions.iter().rev() {
            stack.push((child, Some(idx)));
        }
    }
    arena
}

/// Insert every device of the tree; returns row ids in arena order.
pub(super) async fn insert(
    conn: &mut SqliteConnection,
    reading_id: i64,
    roots: &[StorageDeviceData],
) -> anyhow::Result<Vec<i64>> {
    let arena = flatten(roots);
    let mut row_ids: Vec<i64> = Vec::with_capacity(arena.len());
    for node in &arena {
        let parent_row = node.parent.map(|p| row_ids[p]);
        let d = node.device;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO storage_devices (reading_id, parent_device_id, depth, path, name, device_type, size_bytes, used_bytes, available_bytes, mount_point, fs_type, read_bytes, write_bytes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING id",
        )
        .bind(reading_id)
        .bind(parent_row)
        .bind(node.depth as i64)
        .bind(&node.path)
        .bind(&d.name)
        .bind(&d.device_type)
        .bind(d.size_bytes)
        .bind(d.used_bytes)
        .bind(d.available_bytes)
        .bind(&d.mount_point)
        .bind(&d.fs_type)
        .bind(d.read_bytes)
        .bind(d.write_bytes)
        .fetch_one(&mut *conn)
        .await?;
        row_ids.push(id);
    }
    Ok(row_ids)
}
