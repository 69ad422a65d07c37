//! Engraving bootstrap
//!
//! Builds the process-lifetime `EngravingContext` in dependency order:
//!
//! 1. load the SMuFL and Jianpu symbol code tables
//! 2. register the engraving and text fonts, then load them all
//! 3. insert the text and music-symbol substitutions
//! 4. designate the catalog fallback font
//! 5. bind the rendering backends, then seal the registry
//! 6. build the reference score and measure default metrics
//!
//! Failing step 1, or ending step 5 with an unbound capability, aborts
//! bootstrap. Everything else degrades and continues.

use crate::config::{EngravingConfiguration, NudgeSteps};
use crate::dom::reference_score::{ObjectRegistry, ReferenceScore, Style};
use crate::errors::BootstrapError;
use crate::fonts::{FileFontLoader, FontCatalog, FontLoader, FontNamespace, FontSubstitutions};
use crate::renderers::single::SingleElementRenderer;
use crate::renderers::{
    DisplayList, RenderContext, RenderingBackend, RenderingBackendRegistry, RenderingCapability, ScoreView,
};
use crate::symbols::{SymbolCodeTable, SymbolCodes, SymbolEncoding, SymbolId};
use once_cell::sync::OnceCell;
use std::sync::{Arc, RwLock};

/// How the host process was started
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunMode {
    GuiApp,
    ConsoleApp,
    /// Only registering audio plugins; nothing is engraved
    AudioPluginRegistration,
}

/// Everything the engraver sets up once per process
pub struct EngravingContext {
    config: EngravingConfiguration,
    codes: SymbolCodes,
    catalog: FontCatalog,
    substitutions: FontSubstitutions,
    backends: RenderingBackendRegistry,
    objects: ObjectRegistry,
    reference: RwLock<Option<ReferenceScore>>,
    note_head_width: f64,
}

impl std::fmt::Debug for EngravingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngravingContext")
            .field("catalog", &self.catalog)
            .field("backends", &self.backends)
            .field("note_head_width", &self.note_head_width)
            .finish()
    }
}

impl EngravingContext {
    pub fn config(&self) -> &EngravingConfiguration {
        &self.config
    }

    pub fn codes(&self) -> &SymbolCodes {
        &self.codes
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn substitutions(&self) -> &FontSubstitutions {
        &self.substitutions
    }

    pub fn backends(&self) -> &RenderingBackendRegistry {
        &self.backends
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn nudge_steps(&self) -> NudgeSteps {
        self.config.nudge
    }

    /// Default notehead width primed by the reference score
    pub fn note_head_width(&self) -> f64 {
        self.note_head_width
    }

    /// One-hop font family substitution
    pub fn resolve_font(&self, name: &str, namespace: FontNamespace) -> String {
        self.substitutions.resolve(name, namespace)
    }

    /// Run `f` against the reference score, unless it was torn down
    pub fn with_reference<R>(&self, f: impl FnOnce(&ReferenceScore) -> R) -> Option<R> {
        match self.reference.read() {
            Ok(guard) => guard.as_ref().map(f),
            Err(e) => {
                log::error!("reference score lock poisoned: {}", e);
                None
            }
        }
    }

    /// Release the reference score. Returns `true` the first time only.
    pub fn teardown(&self) -> bool {
        match self.reference.write() {
            Ok(mut guard) => guard.take().is_some(),
            Err(e) => {
                log::error!("reference score lock poisoned: {}", e);
                false
            }
        }
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            codes: &self.codes,
            substitutions: &self.substitutions,
            score_font: &self.config.reference.score_font,
        }
    }

    /// Render a laid-out score with the active full-score renderer
    pub fn render_score(&self, score: &ScoreView) -> DisplayList {
        self.backends.score_renderer().render(score, &self.render_context())
    }

    /// Render one symbol with the active single-element renderer
    pub fn render_symbol(&self, symbol: SymbolId) -> DisplayList {
        self.backends.single_renderer().render_item(symbol, &self.render_context())
    }
}

/// Glyph-name dataset given either as a locator or as JSON text
#[derive(Debug, Clone)]
enum DatasetSource {
    Locator(String),
    Inline(String),
}

/// Runs the bootstrap sequence
pub struct BootstrapSequencer {
    config: EngravingConfiguration,
    loader: Arc<dyn FontLoader>,
    smufl: DatasetSource,
    jianpu: DatasetSource,
    default_backends: bool,
    backends: Vec<RenderingBackend>,
}

impl BootstrapSequencer {
    /// A sequencer reading datasets and fonts from the filesystem
    pub fn new(config: EngravingConfiguration) -> Self {
        let loader = Arc::new(FileFontLoader::new(&config.resource_root));
        Self {
            smufl: DatasetSource::Locator(config.smufl_glyphnames.clone()),
            jianpu: DatasetSource::Locator(config.jianpu_glyphnames.clone()),
            config,
            loader,
            default_backends: true,
            backends: Vec::new(),
        }
    }

    /// Use `loader` instead of reading font files
    pub fn with_font_loader(mut self, loader: Arc<dyn FontLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Use JSON text for the dataset of `encoding` instead of its locator
    pub fn with_glyphnames_json(mut self, encoding: SymbolEncoding, json: impl Into<String>) -> Self {
        let source = DatasetSource::Inline(json.into());
        match encoding {
            SymbolEncoding::Smufl => self.smufl = source,
            SymbolEncoding::Jianpu => self.jianpu = source,
        }
        self
    }

    /// Bind `backend` after the defaults, replacing the default for its capability
    pub fn with_backend(mut self, backend: RenderingBackend) -> Self {
        self.backends.push(backend);
        self
    }

    /// Do not bind the built-in renderers
    pub fn without_default_backends(mut self) -> Self {
        self.default_backends = false;
        self
    }

    fn load_table(&self, encoding: SymbolEncoding, source: &DatasetSource) -> Result<SymbolCodeTable, BootstrapError> {
        let debug_mode = self.config.debug_mode;
        let result = match source {
            DatasetSource::Inline(json) => SymbolCodeTable::from_json_str(encoding, json, debug_mode),
            DatasetSource::Locator(locator) => {
                let path = FileFontLoader::new(&self.config.resource_root).resolve_path(locator);
                SymbolCodeTable::load(encoding, &path, debug_mode)
            }
        };
        result.map_err(|source| BootstrapError::Dataset { encoding, source })
    }

    /// Run every step. `Ok(None)` when `mode` does not engrave at all.
    pub fn run(self, mode: RunMode) -> Result<Option<EngravingContext>, BootstrapError> {
        if mode == RunMode::AudioPluginRegistration {
            log::info!("plugin registration mode, skipping engraving bootstrap");
            return Ok(None);
        }

        // 1. symbol tables
        let smufl = self.load_table(SymbolEncoding::Smufl, &self.smufl)?;
        let jianpu = self.load_table(SymbolEncoding::Jianpu, &self.jianpu)?;
        log::info!("symbol tables loaded: {} smufl, {} jianpu codes", smufl.len(), jianpu.len());
        let codes = SymbolCodes::new(smufl, jianpu);

        // 2. fonts
        let mut catalog = FontCatalog::new(self.loader.clone());
        for font in &self.config.music_fonts {
            catalog.add_font(&font.name, &font.subfamily, &font.locator);
        }
        catalog.load_all_fonts();
        for locator in &self.config.text_fonts {
            // failures are logged by the catalog
            let _ = catalog.add_text_font(locator);
        }

        // 3. substitutions
        let mut substitutions = FontSubstitutions::new();
        for namespace in [FontNamespace::Text, FontNamespace::MusicSymbol] {
            for (from, to) in self.config.substitutions(namespace) {
                substitutions.insert_substitution(namespace, from, to);
            }
        }

        // 4. fallback font
        let preferred = self
            .config
            .fallback_candidates
            .iter()
            .find(|name| catalog.font_by_name(name).is_some())
            .or_else(|| self.config.fallback_candidates.last());
        match preferred {
            Some(name) => catalog.set_fallback_font(name),
            None => log::warn!("no fallback font candidates configured"),
        }

        // 5. rendering backends
        let mut backends = RenderingBackendRegistry::new();
        let mut bindings = Vec::new();
        if self.default_backends {
            bindings.push(RenderingBackend::Score(self.config.renderer.create_score_renderer()));
            bindings.push(RenderingBackend::Single(Arc::new(SingleElementRenderer::new())));
        }
        bindings.extend(self.backends.iter().cloned());
        for backend in bindings {
            // the registry is not sealed yet, so this cannot be refused
            let _ = backends.register_implementation(backend);
        }
        if let Some(missing) = RenderingCapability::ALL.into_iter().find(|cap| !backends.is_bound(*cap)) {
            log::error!("no rendering implementation registered for {}", missing);
            return Err(BootstrapError::MissingRenderer(missing));
        }
        backends.seal();

        // 6. reference score
        let objects = ObjectRegistry::new();
        let style = Style {
            spatium: self.config.reference.spatium,
            musical_text_font: self.config.reference.musical_text_font.clone(),
        };
        let reference = ReferenceScore::build(
            &objects,
            style,
            &self.config.reference.score_font,
            &catalog,
            &codes,
        );
        let note_head_width = reference.note_head_width();
        if !reference.metrics_measured() {
            log::warn!("engraving metrics are degraded");
        }

        log::info!("engraving bootstrap complete");

        Ok(Some(EngravingContext {
            config: self.config,
            codes,
            catalog,
            substitutions,
            backends,
            objects,
            reference: RwLock::new(Some(reference)),
            note_head_width,
        }))
    }
}

static ENGRAVING: OnceCell<EngravingContext> = OnceCell::new();

/// Bootstrap the process-wide context
///
/// Succeeds at most once per process. `Ok(None)` when `mode` skips
/// engraving; nothing is stored in that case.
pub fn init_global(
    sequencer: BootstrapSequencer,
    mode: RunMode,
) -> Result<Option<&'static EngravingContext>, BootstrapError> {
    if ENGRAVING.get().is_some() {
        return Err(BootstrapError::AlreadyInitialized);
    }

    let Some(context) = sequencer.run(mode)? else {
        return Ok(None);
    };

    ENGRAVING
        .set(context)
        .map_err(|_| BootstrapError::AlreadyInitialized)?;
    Ok(ENGRAVING.get())
}

/// The process-wide context, once `init_global` succeeded
pub fn global() -> Option<&'static EngravingContext> {
    ENGRAVING.get()
}
