use crate::{
    collections::EntityPool,
    engine::{ParallaxLayer, Sprite},
    math::{Size, Vector2},
};

/// One quad as handed to the renderer.
#[repr(C)]
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct SpriteInstance {
    pub position: Vector2,
    pub extent: Vector2,
    pub z_order: i32,
    pub visible: u32,
}

unsafe impl bytemuck::Zeroable for SpriteInstance {}

unsafe impl bytemuck::Pod for SpriteInstance {}

/// Everything the renderer needs to draw one frame.
///
/// It is rebuilt after every tick and only read afterwards, so a render thread can take it
/// without touching pools.
#[derive(Debug, Default)]
pub struct Snapshot {
    instances: Vec<SpriteInstance>,
}

impl Snapshot {
    #[inline]
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    #[inline]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn push(&mut self, sprite: &Sprite) {
        self.instances.push(SpriteInstance {
            position: sprite.position,
            extent: sprite.size.into(),
            z_order: sprite.z_order,
            visible: sprite.is_visible() as u32,
        });
    }

    /// Add every active sprite in `pool`. Inactive slots are never drawn.
    pub fn push_pool(&mut self, pool: &EntityPool<Sprite>) {
        pool.for_each_active(|_, sprite| self.push(sprite));
    }

    pub fn push_layer(&mut self, layer: &ParallaxLayer, size: Size, z_order: i32) {
        for position in layer.positions() {
            self.instances.push(SpriteInstance {
                position: *position,
                extent: size.into(),
                z_order,
                visible: 1,
            });
        }
    }

    /// Sort back to front so the renderer can draw in order.
    pub fn sort(&mut self) {
        self.instances.sort_by_key(|instance| instance.z_order);
    }

    #[inline]
    pub fn to_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances[..])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collects_active_sprites_in_z_order() {
        let mut pool = EntityPool::<Sprite>::new(3).unwrap();
        pool.spawn_with(|sprite, _| {
            sprite.reset((1.0, 2.0).into());
            sprite.z_order = 1;
        });
        pool.spawn_with(|sprite, _| sprite.reset((3.0, 4.0).into()));
        pool.deactivate(1);
        let layer = ParallaxLayer::new(2, 10.0, 0.0, 1.0, Vector2::zero()).unwrap();

        let mut snapshot = Snapshot::default();
        snapshot.push_pool(&pool);
        snapshot.push_layer(&layer, (10.0, 10.0).into(), -1);
        snapshot.sort();

        assert_eq!(3, snapshot.len());
        assert_eq!(-1, snapshot.instances()[0].z_order);
        assert_eq!(Vector2::new(1.0, 2.0), snapshot.instances()[2].position);
        assert_eq!(3 * 24, snapshot.to_bytes().len());
    }
}
