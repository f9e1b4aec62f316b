//! Provides a queue of image tiles for the render worker threads. The
//! queue itself is not changed after creation, we simply work through
//! it with an atomic counter to track the index of the next tile to
//! work on.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Pixel rectangle `[x0, x1) x [y0, y1)` of the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
    /// Pixel coordinates of the tile, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// The queue of tiles to be worked on shared immutably between worker
/// threads.
pub struct BlockQueue {
    /// Tiles in Morton order
    tiles: Vec<Tile>,
    /// Index of the next tile to be worked on
    next: AtomicUsize,
}

impl BlockQueue {
    /// Create a block queue for an image of `width` x `height` pixels.
    /// Tiles on the right and bottom border are cropped to the image.
    pub fn new(width: u32, height: u32, tile_size: u32) -> BlockQueue {
        let tile_size: u32 = tile_size.max(1);
        let nx: u32 = (width + tile_size - 1) / tile_size;
        let ny: u32 = (height + tile_size - 1) / tile_size;
        let mut blocks: Vec<(u32, u32)> = (0..nx * ny).map(|i| (i % nx, i / nx)).collect();
        blocks.sort_by_key(|b| morton2(*b));
        let tiles: Vec<Tile> = blocks
            .into_iter()
            .map(|(bx, by)| {
                let x0: u32 = bx * tile_size;
                let y0: u32 = by * tile_size;
                Tile {
                    x0,
                    y0,
                    x1: (x0 + tile_size).min(width),
                    y1: (y0 + tile_size).min(height),
                }
            })
            .collect();
        if tiles.is_empty() {
            log::warn!("Block queue for {}x{} image is empty", width, height);
        }
        BlockQueue {
            tiles,
            next: AtomicUsize::new(0),
        }
    }
    /// Get an iterator to work through the queue
    pub fn iter(&self) -> BlockQueueIterator {
        BlockQueueIterator { queue: self }
    }
    /// Get the next tile in the queue or None if the queue is finished
    pub fn next(&self) -> Option<Tile> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        self.tiles.get(i).copied()
    }
    /// Get the length of the queue
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    /// Check if all tiles have been handed out
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Acquire) >= self.tiles.len()
    }
}

/// Iterator to work through the queue safely
pub struct BlockQueueIterator<'a> {
    queue: &'a BlockQueue,
}

impl<'a> Iterator for BlockQueueIterator<'a> {
    type Item = Tile;
    fn next(&mut self) -> Option<Tile> {
        self.queue.next()
    }
}

/// Insert a 0 bit between each of the low 16 bits of x
fn part1_by1(mut x: u32) -> u32 {
    // x = ---- ---- ---- ---- fedc ba98 7654 3210
    x &= 0x0000_ffff;
    // x = ---- ---- fedc ba98 ---- ---- 7654 3210
    x = (x ^ (x << 8)) & 0x00ff_00ff;
    // x = ---- fedc ---- ba98 ---- 7654 ---- 3210
    x = (x ^ (x << 4)) & 0x0f0f_0f0f;
    // x = --fe --dc --ba --98 --76 --54 --32 --10
    x = (x ^ (x << 2)) & 0x3333_3333;
    // x = -f-e -d-c -b-a -9-8 -7-6 -5-4 -3-2 -1-0
    (x ^ (x << 1)) & 0x5555_5555
}

/// Compute the Morton code for the `(x, y)` block position.
fn morton2(p: (u32, u32)) -> u32 {
    (part1_by1(p.1) << 1) + part1_by1(p.0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tiles_cover_uneven_image_once() {
        let (width, height) = (37_u32, 21_u32);
        let queue = BlockQueue::new(width, height, 16);
        assert_eq!(queue.len(), 3 * 2);
        let mut covered = vec![0_u8; (width * height) as usize];
        for tile in queue.iter() {
            assert!(tile.width() <= 16 && tile.height() <= 16);
            for (x, y) in tile.pixels() {
                covered[(y * width + x) as usize] += 1;
            }
        }
        assert!(covered.iter().all(|c| *c == 1));
        assert!(queue.is_empty());
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn tiles_follow_morton_order() {
        let queue = BlockQueue::new(32, 32, 8);
        let origins: Vec<(u32, u32)> = queue.iter().take(5).map(|t| (t.x0, t.y0)).collect();
        assert_eq!(origins, vec![(0, 0), (8, 0), (0, 8), (8, 8), (16, 0)]);
    }

    #[test]
    fn empty_image_has_no_tiles() {
        let queue = BlockQueue::new(0, 10, 16);
        assert_eq!(queue.len(), 0);
        assert!(queue.next().is_none());
    }

    #[test]
    fn border_tiles_are_cropped() {
        let queue = BlockQueue::new(20, 5, 16);
        let tiles: Vec<Tile> = queue.iter().collect();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[1].area(), 4 * 5);
    }
}
