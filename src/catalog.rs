//! Zone catalog: which zones exist, what each scene and background looks like,
//! and which wildlife belongs where.
//!
//! The catalog is an explicit value handed to task building, not module state.
//! `Catalog::builtin()` carries the trail site's five zones; a TOML file named
//! in the config (`catalog_file`) replaces it wholesale.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Full zone catalog, ordered top of the trail to the bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub zones: Vec<ZoneEntry>,
}

/// One zone: its integrated scene, its backdrop, and its wildlife.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// Zone slug, also the output subdirectory under the assets root
    pub slug: String,

    pub scene: SceneSpec,

    pub background: BackgroundSpec,

    /// Sprites for this zone; transition zones have none
    #[serde(default)]
    pub wildlife: Vec<CreatureSpec>,

    /// Reference image for style transfer, relative to the assets root
    #[serde(default)]
    pub reference: Option<PathBuf>,
}

/// Full scene panel: backdrop with wildlife already in the composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Output filename stem
    pub output_name: String,
    pub prompt: String,
}

/// Backdrop without wildlife, for layering sprites on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundSpec {
    /// Output filename stem
    pub output_name: String,
    pub prompt: String,
}

/// One wildlife sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSpec {
    /// Creature id, also the output filename stem
    pub id: String,
    /// Display name for logs and summaries
    pub name: String,
    pub prompt: String,
}

impl Catalog {
    /// Look up a zone by slug.
    pub fn zone(&self, slug: &str) -> Option<&ZoneEntry> {
        self.zones.iter().find(|z| z.slug == slug)
    }

    /// All zone slugs in catalog order.
    pub fn slugs(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.slug.as_str()).collect()
    }

    /// Load a replacement catalog from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::CatalogNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&raw)
            .map_err(|e| ConfigError::InvalidCatalog(format!("{}: {}", path.display(), e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject catalogs the runner cannot use: duplicate slugs would make the
    /// (zone, item) correlation key ambiguous, empty prompts waste a paid call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut slugs = HashSet::new();
        for zone in &self.zones {
            if zone.slug.trim().is_empty() {
                return Err(ConfigError::InvalidCatalog(
                    "zone slug must not be empty".to_string(),
                ));
            }
            if !slugs.insert(zone.slug.as_str()) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "duplicate zone slug: {}",
                    zone.slug
                )));
            }
            if zone.scene.prompt.trim().is_empty() || zone.background.prompt.trim().is_empty() {
                return Err(ConfigError::InvalidCatalog(format!(
                    "zone {} has an empty prompt",
                    zone.slug
                )));
            }
            let mut ids = HashSet::new();
            for creature in &zone.wildlife {
                if !ids.insert(creature.id.as_str()) {
                    return Err(ConfigError::InvalidCatalog(format!(
                        "duplicate creature id {} in zone {}",
                        creature.id, zone.slug
                    )));
                }
                if creature.prompt.trim().is_empty() {
                    return Err(ConfigError::InvalidCatalog(format!(
                        "creature {} in zone {} has an empty prompt",
                        creature.id, zone.slug
                    )));
                }
            }
        }
        Ok(())
    }

    /// The trail site's catalog: five zones from the sky down to the burrows.
    pub fn builtin() -> Self {
        Catalog {
            zones: vec![
                ZoneEntry {
                    slug: "sky".to_string(),
                    scene: SceneSpec {
                        output_name: "sky-scene-pixar".to_string(),
                        prompt: SKY_SCENE.trim().to_string(),
                    },
                    background: BackgroundSpec {
                        output_name: "sky-background-pixar".to_string(),
                        prompt: SKY_BACKGROUND.trim().to_string(),
                    },
                    wildlife: vec![CreatureSpec {
                        id: "california-condor".to_string(),
                        name: "California Condor".to_string(),
                        prompt: CONDOR.trim().to_string(),
                    }],
                    reference: Some(PathBuf::from("sky/sky-background-v2.png")),
                },
                ZoneEntry {
                    slug: "forest".to_string(),
                    scene: SceneSpec {
                        output_name: "forest-scene-pixar".to_string(),
                        prompt: FOREST_SCENE.trim().to_string(),
                    },
                    background: BackgroundSpec {
                        output_name: "forest-background-pixar".to_string(),
                        prompt: FOREST_BACKGROUND.trim().to_string(),
                    },
                    wildlife: vec![
                        CreatureSpec {
                            id: "banana-slug".to_string(),
                            name: "Banana Slug".to_string(),
                            prompt: BANANA_SLUG.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "stellers-jay".to_string(),
                            name: "Steller's Jay".to_string(),
                            prompt: STELLERS_JAY.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "black-tailed-deer".to_string(),
                            name: "Black-tailed Deer".to_string(),
                            prompt: DEER.trim().to_string(),
                        },
                    ],
                    reference: Some(PathBuf::from("forest/forest-background-v2.png")),
                },
                ZoneEntry {
                    slug: "rocky".to_string(),
                    scene: SceneSpec {
                        output_name: "rocky-scene-pixar".to_string(),
                        prompt: ROCKY_SCENE.trim().to_string(),
                    },
                    background: BackgroundSpec {
                        output_name: "rocky-background-pixar".to_string(),
                        prompt: ROCKY_BACKGROUND.trim().to_string(),
                    },
                    wildlife: vec![
                        CreatureSpec {
                            id: "california-quail".to_string(),
                            name: "California Quail".to_string(),
                            prompt: QUAIL.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "brush-rabbit".to_string(),
                            name: "Brush Rabbit".to_string(),
                            prompt: RABBIT.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "fence-lizard".to_string(),
                            name: "Western Fence Lizard".to_string(),
                            prompt: LIZARD.trim().to_string(),
                        },
                    ],
                    reference: Some(PathBuf::from("rocky/rocky-climb-v2.png")),
                },
                ZoneEntry {
                    slug: "coastal".to_string(),
                    scene: SceneSpec {
                        output_name: "coastal-scene-pixar".to_string(),
                        prompt: COASTAL_SCENE.trim().to_string(),
                    },
                    background: BackgroundSpec {
                        output_name: "coastal-background-pixar".to_string(),
                        prompt: COASTAL_BACKGROUND.trim().to_string(),
                    },
                    wildlife: vec![
                        CreatureSpec {
                            id: "sea-otter".to_string(),
                            name: "Sea Otter".to_string(),
                            prompt: OTTER.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "harbor-seal".to_string(),
                            name: "Harbor Seal".to_string(),
                            prompt: SEAL.trim().to_string(),
                        },
                        CreatureSpec {
                            id: "cormorant".to_string(),
                            name: "Cormorant".to_string(),
                            prompt: CORMORANT.trim().to_string(),
                        },
                    ],
                    reference: Some(PathBuf::from("coastal/coastal-overlook-v2.png")),
                },
                ZoneEntry {
                    slug: "burrows".to_string(),
                    scene: SceneSpec {
                        output_name: "burrows-scene-pixar".to_string(),
                        prompt: BURROWS_SCENE.trim().to_string(),
                    },
                    background: BackgroundSpec {
                        output_name: "burrows-background-pixar".to_string(),
                        prompt: BURROWS_BACKGROUND.trim().to_string(),
                    },
                    wildlife: vec![],
                    reference: Some(PathBuf::from("burrows/underground-transition-v2.png")),
                },
            ],
        }
    }
}

// Scene prompts: full compositions with wildlife already placed.

const SKY_SCENE: &str = r#"
A breathtaking California coastal morning sky, wide panoramic view.

SCENE COMPOSITION:
- Warm golden hour sky with soft cumulus clouds in cream, gold, and soft coral tones
- God rays pierce through cloud breaks, volumetric lighting
- Small flock of brown pelicans gliding in loose V-formation in the mid-distance
- A few seagulls scattered further away
- Distant green coastal hills visible at bottom edge, fading into atmospheric haze
- LEFT AND CENTER areas kept relatively clear (space for website text overlay)
- Birds positioned toward right side of frame

STYLE: Premium Pixar/Disney 3D animation quality, like skies from "Up" or
"How to Train Your Dragon". Warm, inviting, stylized but not flat. Rich saturated
colors, painterly cloud textures with soft edges. Cinematic wide 16:9 composition.
NOT photorealistic - clearly animated film quality.

COLORS: Creamy whites, soft sky blues, warm gold sunlight, hint of coral/peach
in clouds. Green hills below.
"#;

const FOREST_SCENE: &str = r#"
Interior of a majestic California coastal redwood forest, eye-level perspective.

SCENE COMPOSITION:
- Ancient towering redwood trunks with rich reddish-brown textured bark frame
  the scene on both sides
- Dappled golden sunlight filters through canopy, creating volumetric light beams
- Lush forest floor with ferns, redwood sorrel (clover-like), moss on fallen logs
- A bright yellow BANANA SLUG (Pixar-cute, glistening) crawls on a mossy log
  in the lower left foreground
- A vibrant STELLER'S JAY (deep blue with black crest) perched on a branch
  in the upper right, looking alert
- Earthen path winds into misty forest distance
- UPPER AND RIGHT areas have space for text overlays
- Atmospheric haze adds depth

STYLE: Premium Pixar/Disney 3D animation quality, like "Brave" forest scenes or
"Brother Bear". The banana slug and jay are cute, characterful - big eyes,
appealing designs. Warm earth tones, rich greens, golden light pools.
NOT photorealistic - clearly animated film aesthetic.

COLORS: Sage greens, amber browns, reddish-brown bark, golden light beams,
bright yellow slug, deep blue jay.
"#;

const ROCKY_SCENE: &str = r#"
Dramatic Big Sur rocky coastal terrain at golden hour, wide view.

SCENE COMPOSITION:
- Weathered granite outcrops with detailed texture - warm terracotta undertones,
  lichen patches, cracks and fissures
- Wind-sculpted Monterey cypress tree(s) in mid-ground, gnarled branches
- Coastal sagebrush and dudleya succulents dot the rocks
- A charming CALIFORNIA QUAIL (round body, distinctive curved black head plume)
  stands alertly on a rock in the lower right area
- A small WESTERN FENCE LIZARD doing push-ups on a nearby sunny rock,
  showing blue belly patches
- Dramatic clouds sweep across blue sky
- Distant Pacific Ocean glimpsed through rock formations
- LEFT AND CENTER areas clear for text content
- Quail and lizard are small but detailed, positioned as natural elements

STYLE: Premium Pixar/Disney 3D animation quality, like "The Good Dinosaur"
landscapes. The quail is adorable (topknot is a fun character feature), the
lizard is cute like Pascal from "Tangled". Rich textural rock details,
warm afternoon light with long shadows. NOT photorealistic.

COLORS: Warm tans, terracotta, sage green vegetation, weathered gray granite,
blue sky, the quail's blue-gray plumage with brown accents.
"#;

const COASTAL_SCENE: &str = r#"
Sweeping Big Sur coastal overlook at golden hour, cinematic wide view.

SCENE COMPOSITION:
- Dramatic cliffs drop to sandy cove where turquoise waves crash rhythmically
- Ice plant with magenta/pink flowers and coastal buckwheat in foreground
- Golden hour sunlight creates sparkling highlights on ocean surface
- Sea stacks and rocky outcrops dot the coastline
- Distant fog bank softens the horizon
- An adorable SEA OTTER floating on its back in the calm water of the cove,
  positioned in the LOWER LEFT corner. Fluffy brown fur, white face with
  whiskers, paws near chest, relaxed playful expression.
- The otter is small relative to the landscape but clearly visible
- CENTER AND RIGHT areas clear for text overlay
- Atmospheric perspective with layered depth

STYLE: Premium Pixar/Disney 3D animation quality, like "Finding Nemo" ocean
scenes or "Luca" coastlines. The sea otter is INCREDIBLY cute - the kind that
makes audiences "awww". Big eyes, fluffy wet fur, playful energy.
Rich ocean rendering, warm golden light. NOT photorealistic.

COLORS: Deep ocean blues, turquoise shallows, golden light, misty grays,
green succulents, magenta ice plant flowers, brown otter with cream face.
"#;

const BURROWS_SCENE: &str = r#"
Cross-section view of underground burrows, transitional scene leading to
something deeper below.

SCENE COMPOSITION:
- Rich dark soil layers with visible strata - topsoil, clay, rocks
- Intricate root systems from trees above, weaving through soil
- Cozy rounded tunnel openings carved by burrowing animals
- Soft shafts of warm daylight filter down through small surface holes
- Dust motes float in light beams
- Small embedded pebbles, organic matter, occasional earthworm
- The tunnels lead DOWNWARD, hinting at deeper chambers below
- No specific animals - this is a transition zone
- UPPER AREA shows surface (grass, roots entering soil)
- LOWER AREA shows tunnels leading deeper (suggesting datacenter below)
- Cozy, inviting atmosphere like a hobbit's home, not claustrophobic

STYLE: Premium Pixar/Disney 3D animation quality, like "Fantastic Mr. Fox"
or "Zootopia" underground scenes. Warm inviting earth tones, detailed soil
textures, organic feel. Sense of mystery about what lies below.
NOT photorealistic - clearly animated aesthetic.

COLORS: Rich browns, deep amber, chocolate tones, cream highlights where
light enters, hints of cooler blue-gray deeper down suggesting tech below.
"#;

// Background prompts: the same zones without wildlife, for layering sprites.

const SKY_BACKGROUND: &str = r#"
Breathtaking California coastal sky at golden hour. Dramatic layered cumulus clouds
painted in warm cream, gold, and soft coral tones. Brilliant god rays pierce through
cloud breaks, casting volumetric light across the scene. A majestic California Condor
with detailed feathers soars against the illuminated clouds. Distant rolling green hills
fade into atmospheric perspective below.

Art direction: High-quality 3D animated film style like Pixar's "Up" or DreamWorks'
"How to Train Your Dragon". Rich color saturation, sophisticated lighting, detailed
cloud textures with soft painterly edges. Cinematic wide composition. NOT flat or
cartoonish - premium animated film quality with depth and atmosphere.
Resolution: Ultra high detail, 4K quality rendering.
"#;

const FOREST_BACKGROUND: &str = r#"
Majestic coastal California redwood forest interior. Ancient towering redwood trunks
with richly textured reddish-brown bark frame the scene, stretching upward beyond view.
Volumetric golden sunbeams filter through the dense canopy, creating dramatic pools of
light on the forest floor. Lush ferns, redwood sorrel with clover-like leaves, and
moss-covered fallen logs carpet the ground. A winding earthen path leads deeper into
the forest. Atmospheric haze adds depth and mystery.

Art direction: High-quality 3D animated film style like Pixar's "Brave" or DreamWorks'
"Shrek" forest scenes. Rich saturated earth tones - sage greens, amber browns, warm
golden light. Detailed bark textures, delicate fern fronds, volumetric lighting.
NOT flat illustration - premium animated film quality with atmospheric depth.
Resolution: Ultra high detail, 4K quality rendering.
"#;

const ROCKY_BACKGROUND: &str = r#"
Dramatic Big Sur coastal terrain at golden hour. Weathered granite outcrops with
detailed surface textures - cracks, lichen patches, warm terracotta undertones.
Iconic wind-sculpted Monterey cypress trees cling to cliffsides, their gnarled branches
shaped by ocean winds. Native dudleya succulents with rosette formations and coastal
sagebrush dot the rocky landscape. Dramatic cloud formations sweep across a deep blue
sky. Distant Pacific Ocean visible through rock formations.

Art direction: High-quality 3D animated film style like Pixar's "The Good Dinosaur"
landscapes. Rich textural detail on rocks, sophisticated color palette - warm tans,
terracotta, sage green, weathered gray granite. Dramatic lighting with long shadows.
NOT cartoonish - premium animated film quality with photographic depth and detail.
Resolution: Ultra high detail, 4K quality rendering.
"#;

const COASTAL_BACKGROUND: &str = r#"
Sweeping Big Sur coastal vista from a dramatic clifftop overlook. Rugged cliffs
plunge down to a pristine sandy cove where turquoise waves crash in rhythmic foam
patterns. Native ice plant with magenta flowers and coastal buckwheat blanket the
foreground cliff edge. Golden hour sunlight reflects off the Pacific Ocean surface,
creating sparkling highlights. Distant fog bank hovers on the horizon, softening
the ocean edge. Sea stacks and rocky outcrops dot the coastline.

Art direction: High-quality 3D animated film style like Pixar's "Finding Nemo"
surface scenes or "Luca" coastlines. Rich ocean blues with sophisticated water
rendering, warm golden light, detailed vegetation textures. Atmospheric perspective
with layered depth. NOT flat - premium animated film quality cinematography.
Resolution: Ultra high detail, 4K quality rendering.
"#;

const BURROWS_BACKGROUND: &str = r#"
Warm underground burrow network cross-section view. Cozy earthen tunnels with
carefully carved walls showing layers of rich dark soil, small embedded pebbles,
and intricate root systems from trees above. Soft shafts of warm daylight filter
down through ceiling openings, illuminating dust motes in the air. Small alcoves
suggest living spaces. The tunnels feel homey and inviting like a hobbit's dwelling.
Organic textures throughout - packed earth walls, smooth floor paths.

Art direction: High-quality 3D animated film style like "Fantastic Mr. Fox" or
"Zootopia" underground scenes. Warm inviting atmosphere despite being underground.
Rich color palette - deep amber, chocolate brown, cream highlights, warm light pools.
Detailed soil and root textures. Cozy not claustrophobic. Premium film quality depth.
Resolution: Ultra high detail, 4K quality rendering.
"#;

// Wildlife sprite prompts: single subject on a plain background for extraction.

const CONDOR: &str = r#"
A majestic California Condor in flight, wings fully extended, soaring gracefully.
Massive black wingspan with distinctive white triangular patches under wings.
Bald orange-red head, hooked beak, powerful talons tucked.
Bird viewed from below/side angle as if soaring overhead.

STYLE: Pixar/Disney 3D animated film quality, like characters from "Up" or
"Rio". Stylized but detailed, appealing and majestic. Soft feather textures,
expressive eyes. Warm coloring. Character should look approachable yet grand.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const BANANA_SLUG: &str = r#"
An adorable banana slug crawling along, bright yellow-gold body with some brown
spots, slimy glistening texture. Cute eye stalks extended and alert, friendly
expression. Leaving a slight slime trail. Detailed texture showing the slug's
mantle and muscular foot.

STYLE: Pixar/Disney 3D animated film quality, like a character from "A Bug's
Life" or "Turbo". Cute and appealing despite being a slug. Big expressive
eyes on stalks, friendly demeanor. Stylized but recognizable.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const STELLERS_JAY: &str = r#"
A vibrant Steller's Jay perched alertly. Striking deep blue plumage with
black crest feathers standing tall. Black head and upper body transitioning
to brilliant cobalt blue wings and tail. Sharp intelligent eyes, sturdy beak.
Bird shown in 3/4 view, crest raised confidently.

STYLE: Pixar/Disney 3D animated film quality, like birds from "Rio" or
"Ferdinand". Beautiful saturated colors, detailed feathers with soft texture.
Personality in the pose - confident and curious. Stylized but realistic enough
to be recognizable.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const DEER: &str = r#"
A gentle black-tailed deer, doe or young buck, standing alert in a graceful pose.
Warm brown coat with lighter underbelly, distinctive large black-tipped tail.
Large expressive dark eyes, tall ears perked forward. Delicate legs, small hooves.
Looking toward camera with curious but calm expression.

STYLE: Pixar/Disney 3D animated film quality, like Bambi reimagined in modern
3D animation or the deer from "Brother Bear". Soft fur texture, warm appealing
colors, large expressive eyes. Gentle and elegant character design.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const QUAIL: &str = r#"
A charming California Quail standing proudly. Distinctive curved black plume
(topknot) bobbing from forehead. Scaled gray-brown plumage, striking black and
white face pattern, chestnut-colored belly. Plump round body, small head.
Alert posture with one foot slightly raised.

STYLE: Pixar/Disney 3D animated film quality. Adorable round shape, expressive
eyes, the signature topknot as a fun character feature. Think cute game bird
character. Soft feather textures, warm earthy colors.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const RABBIT: &str = r#"
A cute brush rabbit sitting alert, small and compact. Soft brown-gray fur,
lighter underbelly. Short rounded ears (smaller than jackrabbit), large dark
eyes, small pink nose twitching. Fluffy cottontail visible. Front paws together,
ready to hop. Slightly fluffed-up fur for warmth.

STYLE: Pixar/Disney 3D animated film quality, like rabbits from "Zootopia" or
"Bambi". Absolutely adorable - big eyes, soft fluffy fur texture, expressive
face. Character audiences would want to cuddle.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const LIZARD: &str = r#"
A western fence lizard doing push-ups on a rock, displaying its blue belly
patches. Spiny scales along body, gray-brown coloring with darker patterns.
Alert eye, mouth slightly open. Distinctive blue throat and side patches
visible as it does its territorial display. Long tail, splayed toes with tiny
claws gripping rock surface.

STYLE: Pixar/Disney 3D animated film quality, like Pascal from "Tangled" but
as a fence lizard. Cute and characterful despite being a reptile. Expressive
eyes, personality in the pose. Detailed scales but stylized.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const OTTER: &str = r#"
An adorable sea otter floating on its back in calm water, paws up near chest.
Dense fluffy brown fur, lighter face with visible whiskers, small round ears.
Cute button nose, bright intelligent eyes. Webbed hind feet visible. Relaxed,
playful expression - the classic otter floating pose.

STYLE: Pixar/Disney 3D animated film quality, like characters from "Finding
Dory". Incredibly cute and appealing - the kind of character that makes
audiences go "awww". Fluffy wet fur texture, expressive face, playful energy.
IMPORTANT: Plain solid color background (light blue suggesting water surface)
for easy extraction. Single subject only, full body visible, high detail.
"#;

const SEAL: &str = r#"
A friendly harbor seal lounging on a rock, sleek body in classic banana pose
(head and tail raised). Spotted gray-brown coat pattern, large dark expressive
eyes, long whiskers, V-shaped nostrils. Rotund body, small flippers. Looking
at viewer with curious, almost smiling expression.

STYLE: Pixar/Disney 3D animated film quality, like characters from "Finding
Dory" (Fluke and Rudder). Endearing and charismatic, the sleepy satisfied
look seals have. Smooth wet fur texture, soulful eyes.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

const CORMORANT: &str = r#"
A Brandt's cormorant perched on a rock, wings spread slightly to dry.
Sleek black plumage with iridescent green sheen, distinctive blue throat
pouch. Long hooked beak, bright turquoise-blue eyes. Elegant S-curved neck,
webbed feet gripping rock. Wings held open in characteristic drying pose.

STYLE: Pixar/Disney 3D animated film quality, like Nigel from "Finding Nemo"
but more elegant. Dramatic pose, beautiful iridescent feathers, striking eyes.
Character with presence and dignity despite being a seabird.
IMPORTANT: Plain solid color background (light gray or white) for easy extraction.
Single subject only, full body visible, high detail.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_zones_in_trail_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.slugs(),
            vec!["sky", "forest", "rocky", "coastal", "burrows"]
        );
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_builtin_wildlife_counts() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.zone("sky").unwrap().wildlife.len(), 1);
        assert_eq!(catalog.zone("forest").unwrap().wildlife.len(), 3);
        assert_eq!(catalog.zone("rocky").unwrap().wildlife.len(), 3);
        assert_eq!(catalog.zone("coastal").unwrap().wildlife.len(), 3);
        // transition zone, no sprites
        assert!(catalog.zone("burrows").unwrap().wildlife.is_empty());
    }

    #[test]
    fn test_builtin_prompts_trimmed() {
        let catalog = Catalog::builtin();
        for zone in &catalog.zones {
            assert_eq!(zone.scene.prompt, zone.scene.prompt.trim());
            assert_eq!(zone.background.prompt, zone.background.prompt.trim());
        }
    }

    #[test]
    fn test_unknown_zone_lookup() {
        assert!(Catalog::builtin().zone("datacenter").is_none());
    }

    #[test]
    fn test_validate_rejects_duplicate_slug() {
        let mut catalog = Catalog::builtin();
        let dup = catalog.zones[0].clone();
        catalog.zones.push(dup);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_creature() {
        let mut catalog = Catalog::builtin();
        let dup = catalog.zones[1].wildlife[0].clone();
        catalog.zones[1].wildlife.push(dup);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[zones]]
slug = "tidepool"
reference = "tidepool/tidepool-v1.png"

[zones.scene]
output_name = "tidepool-scene"
prompt = "A tidepool scene"

[zones.background]
output_name = "tidepool-background"
prompt = "A tidepool backdrop"

[[zones.wildlife]]
id = "hermit-crab"
name = "Hermit Crab"
prompt = "A hermit crab"
"#,
        )
        .unwrap();

        let catalog = Catalog::from_toml_file(&path).unwrap();
        assert_eq!(catalog.slugs(), vec!["tidepool"]);
        let zone = catalog.zone("tidepool").unwrap();
        assert_eq!(zone.wildlife[0].id, "hermit-crab");
        assert_eq!(
            zone.reference.as_deref(),
            Some(std::path::Path::new("tidepool/tidepool-v1.png"))
        );
    }

    #[test]
    fn test_from_toml_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = Catalog::from_toml_file(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogNotFound(_)));
    }
}
