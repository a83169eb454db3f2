use std::fmt;
use std::ops::Range;

use fxhash::FxHashMap;
use log::debug;

use crate::CacheLayoutError;

/// Declarative table of images the path-tracing passes use to carry data
/// between each other and between frames.
///
/// Each image occupies one binding slot, except for double-buffered ones which
/// occupy two consecutive slots: the first one contains what has been written
/// during the previous frame, the second one is written during the current
/// frame. Calling [`CacheLayout::swap()`] exchanges the physical images backing
/// those slots.
#[derive(Clone, Debug)]
pub struct CacheLayout {
    images: Vec<CacheImage>,
    index: FxHashMap<String, usize>,
    alternate: bool,
}

impl CacheLayout {
    pub fn builder() -> CacheLayoutBuilder {
        CacheLayoutBuilder {
            images: Default::default(),
        }
    }

    /// Returns the layout used by cubetracer's passes.
    pub fn cubetracer() -> Result<Self, CacheLayoutError> {
        use wgpu::TextureFormat::*;

        Self::builder()
            .simple("RESULT_IMAGE", Rgba8Unorm)
            .double("DENOISE_HISTORY_LENGTH", R32Float)
            .double("DENOISE_MOMENTS", Rgba32Float)
            .simple("NORMALS", Rgba32Float)
            .simple("INIT_DISTANCES", R32Float)
            .simple("DENOISE_PREV_INITIAL_DISTANCES", R32Float)
            .simple("DIRECT_ILLUM", Rgba32Float)
            .simple("DENOISE_PREV_DIFFUSE", Rgba32Float)
            .simple("ORIGIN", Rgba32Float)
            .simple("SHADOWS", Rgba32Float)
            .simple("ILLUM_COEFFS", Rgba32Float)
            .simple("PT_ILLUM", Rgba32Float)
            .sampled("NOISE")
            .sampled("SHADOW_MAP")
            .sampler("SHADOW_MAP_SAMPLER")
            .double("GOD_RAYS", Rgba32Float)
            .build()
    }

    pub fn images(&self) -> &[CacheImage] {
        &self.images
    }

    pub fn image(&self, name: &str) -> Result<&CacheImage, CacheLayoutError> {
        self.index
            .get(name)
            .map(|&idx| &self.images[idx])
            .ok_or_else(|| CacheLayoutError::UnknownImage(name.to_owned()))
    }

    /// Returns binding slots occupied by given image.
    pub fn slots(&self, name: &str) -> Result<Range<u32>, CacheLayoutError> {
        Ok(self.image(name)?.slots())
    }

    /// Total number of binding slots.
    pub fn len(&self) -> u32 {
        self.images
            .iter()
            .map(|image| image.buffering.slots())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn bind_group_layout_entries(&self) -> Vec<wgpu::BindGroupLayoutEntry> {
        self.images
            .iter()
            .flat_map(|image| {
                let ty = image.kind.binding_type();

                image.slots().map(move |binding| wgpu::BindGroupLayoutEntry {
                    binding,
                    visibility: wgpu::ShaderStages::FRAGMENT
                        | wgpu::ShaderStages::COMPUTE,
                    ty,
                    count: None,
                })
            })
            .collect()
    }

    /// Returns, for each binding slot, the physical image backing it during
    /// the current frame.
    pub fn resources(&self) -> Vec<CacheResource<'_>> {
        self.images
            .iter()
            .flat_map(|image| {
                let copies = match image.buffering {
                    Buffering::Simple => [Some(ImageCopy::A), None],
                    Buffering::Double if self.alternate => {
                        [Some(ImageCopy::B), Some(ImageCopy::A)]
                    }
                    Buffering::Double => {
                        [Some(ImageCopy::A), Some(ImageCopy::B)]
                    }
                };

                copies
                    .into_iter()
                    .flatten()
                    .zip(image.slots())
                    .map(move |(copy, binding)| CacheResource {
                        binding,
                        name: &image.name,
                        copy,
                    })
            })
            .collect()
    }

    /// Exchanges the double-buffered images, so that what has been written
    /// during this frame becomes readable as the previous frame's data.
    pub fn swap(&mut self) {
        self.alternate = !self.alternate;
    }

    pub fn alternate(&self) -> bool {
        self.alternate
    }
}

pub struct CacheLayoutBuilder {
    images: Vec<(String, CacheImageKind, Buffering)>,
}

impl CacheLayoutBuilder {
    /// Adds a single storage image.
    pub fn simple(
        self,
        name: impl ToString,
        format: wgpu::TextureFormat,
    ) -> Self {
        self.add(name, CacheImageKind::Storage(format), Buffering::Simple)
    }

    /// Adds a storage image that exists in two copies, swapped each frame.
    pub fn double(
        self,
        name: impl ToString,
        format: wgpu::TextureFormat,
    ) -> Self {
        self.add(name, CacheImageKind::Storage(format), Buffering::Double)
    }

    /// Adds a read-only texture, sampled by the shaders.
    pub fn sampled(self, name: impl ToString) -> Self {
        self.add(name, CacheImageKind::Sampled, Buffering::Simple)
    }

    pub fn sampler(self, name: impl ToString) -> Self {
        self.add(name, CacheImageKind::Sampler, Buffering::Simple)
    }

    fn add(
        mut self,
        name: impl ToString,
        kind: CacheImageKind,
        buffering: Buffering,
    ) -> Self {
        self.images.push((name.to_string(), kind, buffering));
        self
    }

    pub fn build(self) -> Result<CacheLayout, CacheLayoutError> {
        if self.images.is_empty() {
            return Err(CacheLayoutError::Empty);
        }

        let mut images = Vec::with_capacity(self.images.len());
        let mut index = FxHashMap::default();
        let mut binding = 0;

        for (name, kind, buffering) in self.images {
            if index.insert(name.clone(), images.len()).is_some() {
                return Err(CacheLayoutError::DuplicateImage(name));
            }

            debug!(
                "Registering cache image `{name}`: binding={binding}, \
                 kind={kind}, buffering={buffering:?}"
            );

            images.push(CacheImage {
                name,
                kind,
                buffering,
                binding,
            });

            binding += buffering.slots();
        }

        Ok(CacheLayout {
            images,
            index,
            alternate: false,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CacheImage {
    pub name: String,
    pub kind: CacheImageKind,
    pub buffering: Buffering,

    /// First binding slot occupied by this image
    pub binding: u32,
}

impl CacheImage {
    pub fn slots(&self) -> Range<u32> {
        self.binding..(self.binding + self.buffering.slots())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheImageKind {
    /// Image read and written by the passes
    Storage(wgpu::TextureFormat),

    /// Texture read through a sampler
    Sampled,

    Sampler,
}

impl CacheImageKind {
    fn binding_type(self) -> wgpu::BindingType {
        match self {
            Self::Storage(format) => wgpu::BindingType::StorageTexture {
                access: wgpu::StorageTextureAccess::ReadWrite,
                format,
                view_dimension: wgpu::TextureViewDimension::D2,
            },

            Self::Sampled => wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float {
                    filterable: false,
                },
            },

            Self::Sampler => wgpu::BindingType::Sampler(
                wgpu::SamplerBindingType::NonFiltering,
            ),
        }
    }
}

impl fmt::Display for CacheImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(format) => write!(f, "storage({format:?})"),
            Self::Sampled => write!(f, "sampled"),
            Self::Sampler => write!(f, "sampler"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffering {
    Simple,
    Double,
}

impl Buffering {
    pub fn slots(self) -> u32 {
        match self {
            Buffering::Simple => 1,
            Buffering::Double => 2,
        }
    }
}

/// Physical image backing a binding slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheResource<'a> {
    pub binding: u32,
    pub name: &'a str,
    pub copy: ImageCopy,
}

/// Which of the (at most two) physical copies of an image is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageCopy {
    A,
    B,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(
        resources: &'a [CacheResource<'a>],
        binding: u32,
    ) -> CacheResource<'a> {
        resources
            .iter()
            .copied()
            .find(|resource| resource.binding == binding)
            .unwrap()
    }

    #[test]
    fn cubetracer_layout() {
        let layout = CacheLayout::cubetracer().unwrap();

        assert_eq!(19, layout.len());
        assert_eq!(16, layout.images().len());

        assert_eq!(0..1, layout.slots("RESULT_IMAGE").unwrap());
        assert_eq!(1..3, layout.slots("DENOISE_HISTORY_LENGTH").unwrap());
        assert_eq!(3..5, layout.slots("DENOISE_MOMENTS").unwrap());
        assert_eq!(5..6, layout.slots("NORMALS").unwrap());
        assert_eq!(13..14, layout.slots("PT_ILLUM").unwrap());
        assert_eq!(14..15, layout.slots("NOISE").unwrap());
        assert_eq!(15..16, layout.slots("SHADOW_MAP").unwrap());
        assert_eq!(16..17, layout.slots("SHADOW_MAP_SAMPLER").unwrap());
        assert_eq!(17..19, layout.slots("GOD_RAYS").unwrap());

        assert_eq!(
            CacheImageKind::Storage(wgpu::TextureFormat::Rgba8Unorm),
            layout.image("RESULT_IMAGE").unwrap().kind
        );

        assert_eq!(
            CacheImageKind::Storage(wgpu::TextureFormat::R32Float),
            layout.image("INIT_DISTANCES").unwrap().kind
        );
    }

    #[test]
    fn bind_group_layout_entries() {
        let layout = CacheLayout::cubetracer().unwrap();
        let entries = layout.bind_group_layout_entries();

        assert_eq!(19, entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(idx as u32, entry.binding);
        }

        assert_eq!(entries[1].ty, entries[2].ty);

        assert!(matches!(
            entries[14].ty,
            wgpu::BindingType::Texture { .. }
        ));

        assert!(matches!(entries[16].ty, wgpu::BindingType::Sampler(_)));

        assert!(matches!(
            entries[18].ty,
            wgpu::BindingType::StorageTexture {
                format: wgpu::TextureFormat::Rgba32Float,
                ..
            }
        ));
    }

    #[test]
    fn swapping() {
        let mut layout = CacheLayout::cubetracer().unwrap();
        let resources = layout.resources();

        assert_eq!(19, resources.len());
        assert_eq!(ImageCopy::A, find(&resources, 0).copy);
        assert_eq!(ImageCopy::A, find(&resources, 1).copy);
        assert_eq!(ImageCopy::B, find(&resources, 2).copy);
        assert_eq!("DENOISE_HISTORY_LENGTH", find(&resources, 2).name);

        layout.swap();

        let resources = layout.resources();

        // Simple images stay in place
        assert_eq!(ImageCopy::A, find(&resources, 0).copy);

        // What has been written last frame is now readable as history
        assert_eq!(ImageCopy::B, find(&resources, 1).copy);
        assert_eq!(ImageCopy::A, find(&resources, 2).copy);
        assert_eq!(ImageCopy::B, find(&resources, 17).copy);
        assert_eq!(ImageCopy::A, find(&resources, 18).copy);

        layout.swap();

        assert_eq!(ImageCopy::A, find(&layout.resources(), 1).copy);
    }

    #[test]
    fn unknown_image() {
        let layout = CacheLayout::cubetracer().unwrap();

        assert_eq!(
            Err(CacheLayoutError::UnknownImage("FOO".into())),
            layout.slots("FOO")
        );
    }

    #[test]
    fn duplicate_image() {
        let result = CacheLayout::builder()
            .simple("NORMALS", wgpu::TextureFormat::Rgba32Float)
            .double("NORMALS", wgpu::TextureFormat::R32Float)
            .build();

        assert_eq!(
            Err(CacheLayoutError::DuplicateImage("NORMALS".into())),
            result.map(|_| ())
        );
    }

    #[test]
    fn empty_layout() {
        assert_eq!(
            Err(CacheLayoutError::Empty),
            CacheLayout::builder().build().map(|_| ())
        );
    }
}
