//! Speech gateway with deterministic fallback
//!
//! Routes are evaluated in order. A route is taken only when the request
//! names its provider and the backend has credentials. When no route applies,
//! or the chosen backend fails, the caller gets a client directive instead of
//! an error.

use std::sync::Arc;

use domain::{ClientDirective, SpeechOutput, TeacherVoice};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{SpeechConfig, SpeechProvider},
    error::SpeechError,
    ports::TextToSpeech,
    providers::{azure::AzureSpeechProvider, lovo::LovoSpeechProvider},
};

/// One server-side backend in the chain
#[derive(Clone)]
pub struct SpeechRoute {
    provider: SpeechProvider,
    backend: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechRoute")
            .field("provider", &self.provider)
            .field("configured", &self.backend.is_configured())
            .finish()
    }
}

impl SpeechRoute {
    pub fn new(backend: Arc<dyn TextToSpeech>) -> Self {
        Self {
            provider: backend.provider(),
            backend,
        }
    }

    pub const fn provider(&self) -> SpeechProvider {
        self.provider
    }

    /// The hint names this route and its backend is usable
    pub fn accepts(&self, hint: &str) -> bool {
        hint == self.provider.as_str() && self.backend.is_configured()
    }
}

/// Outcome of evaluating the chain for a hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Backend(SpeechProvider),
    Directive,
}

/// Ordered list of speech routes
#[derive(Debug, Clone, Default)]
pub struct FallbackChain {
    routes: Vec<SpeechRoute>,
}

impl FallbackChain {
    pub fn new(routes: Vec<SpeechRoute>) -> Self {
        Self { routes }
    }

    /// Azure first, then LOVO
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let azure = AzureSpeechProvider::new(config.azure.clone(), config.timeout_ms)?;
        let lovo = LovoSpeechProvider::new(config.lovo.clone(), config.timeout_ms)?;
        Ok(Self::new(vec![
            SpeechRoute::new(Arc::new(azure)),
            SpeechRoute::new(Arc::new(lovo)),
        ]))
    }

    fn route_for(&self, hint: &str) -> Option<&SpeechRoute> {
        self.routes.iter().find(|route| route.accepts(hint))
    }

    /// Which path a request with this hint takes, without calling anything
    pub fn plan(&self, hint: &str) -> RouteDecision {
        self.route_for(hint)
            .map_or(RouteDecision::Directive, |route| {
                RouteDecision::Backend(route.provider)
            })
    }

    /// Providers with usable credentials
    pub fn configured(&self) -> Vec<SpeechProvider> {
        self.routes
            .iter()
            .filter(|route| route.backend.is_configured())
            .map(SpeechRoute::provider)
            .collect()
    }
}

/// Entry point for speech synthesis
#[derive(Debug, Clone)]
pub struct SpeechGateway {
    chain: FallbackChain,
    default_provider: String,
}

impl SpeechGateway {
    pub fn new(chain: FallbackChain, default_provider: impl Into<String>) -> Self {
        Self {
            chain,
            default_provider: default_provider.into(),
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self::new(
            FallbackChain::from_config(config)?,
            config.default_provider.clone(),
        ))
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Provider used when a request names none
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Vocalize `text` with the teacher's voice.
    ///
    /// Never fails because of a backend: unusable or failing backends degrade
    /// to a client directive. Only empty text is rejected.
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice, hint = ?hint))]
    pub async fn synthesize(
        &self,
        text: &str,
        voice: TeacherVoice,
        hint: Option<&str>,
    ) -> Result<SpeechOutput, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let hint = hint.unwrap_or(&self.default_provider);

        let Some(route) = self.chain.route_for(hint) else {
            if matches!(hint, "azure" | "lovo") {
                warn!(provider = hint, "Credentials not found, falling back to client speech");
            } else {
                debug!(provider = hint, "Using client speech");
            }
            return Ok(directive(text, voice));
        };

        match route.backend.synthesize(text, voice).await {
            Ok(audio) => {
                info!(
                    provider = %route.provider,
                    bytes = audio.data.len(),
                    visemes = audio.visemes.len(),
                    "Speech synthesized"
                );
                Ok(SpeechOutput::Audio(audio))
            },
            Err(e) => {
                warn!(provider = %route.provider, error = %e, "Speech backend failed, falling back to client speech");
                Ok(directive(text, voice))
            },
        }
    }
}

fn directive(text: &str, voice: TeacherVoice) -> SpeechOutput {
    SpeechOutput::ClientDirective(ClientDirective::japanese(text, voice.as_str()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use domain::{AudioFormat, SynthesizedAudio, VisemeCue, VisemeTimeline};

    use super::*;

    struct ScriptedTts {
        provider: SpeechProvider,
        configured: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    impl ScriptedTts {
        fn new(provider: SpeechProvider, configured: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                provider,
                configured,
                fail,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextToSpeech for ScriptedTts {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: TeacherVoice,
        ) -> Result<SynthesizedAudio, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SpeechError::RequestFailed("Status 500".to_string()));
            }
            let visemes = match self.provider {
                SpeechProvider::Azure => {
                    VisemeTimeline::new(vec![VisemeCue::index(0, 2), VisemeCue::index(300, 0)])
                },
                _ => VisemeTimeline::empty(),
            };
            Ok(SynthesizedAudio {
                data: b"RIFF".to_vec(),
                format: AudioFormat::Wav,
                visemes,
            })
        }

        fn provider(&self) -> SpeechProvider {
            self.provider
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn gateway(azure: &Arc<ScriptedTts>, lovo: &Arc<ScriptedTts>) -> SpeechGateway {
        SpeechGateway::new(
            FallbackChain::new(vec![
                SpeechRoute::new(azure.clone()),
                SpeechRoute::new(lovo.clone()),
            ]),
            "browser",
        )
    }

    #[tokio::test]
    async fn azure_with_credentials_returns_audio_with_visemes() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);

        let output = gateway(&azure, &lovo)
            .synthesize("こんにちは", TeacherVoice::Nanami, Some("azure"))
            .await
            .unwrap();

        assert!(output.is_audio());
        assert_eq!(output.visemes().len(), 2);
        assert_eq!(azure.calls(), 1);
        assert_eq!(lovo.calls(), 0);
    }

    #[tokio::test]
    async fn lovo_audio_has_no_visemes() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);

        let output = gateway(&azure, &lovo)
            .synthesize("こんにちは", TeacherVoice::Naoki, Some("lovo"))
            .await
            .unwrap();

        assert!(output.is_audio());
        assert!(output.visemes().is_empty());
        assert_eq!(lovo.calls(), 1);
    }

    #[tokio::test]
    async fn missing_credentials_skip_network() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, false, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, false, false);
        let gateway = gateway(&azure, &lovo);

        for hint in ["azure", "lovo"] {
            let output = gateway
                .synthesize("こんにちは", TeacherVoice::Nanami, Some(hint))
                .await
                .unwrap();
            assert!(!output.is_audio());
        }
        assert_eq!(azure.calls() + lovo.calls(), 0);
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_directive() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, true);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);

        let output = gateway(&azure, &lovo)
            .synthesize("日本 に 住んで います か ?", TeacherVoice::Nanami, Some("azure"))
            .await
            .unwrap();

        let SpeechOutput::ClientDirective(directive) = output else {
            panic!("expected a client directive");
        };
        assert_eq!(directive.text, "日本 に 住んで います か ?");
        assert_eq!(directive.lang, "ja-JP");
        assert!((directive.rate - 1.0).abs() < f32::EPSILON);
        assert!((directive.pitch - 1.0).abs() < f32::EPSILON);
        assert_eq!(azure.calls(), 1);
        assert_eq!(lovo.calls(), 0);
    }

    #[tokio::test]
    async fn browser_and_unknown_hints_use_directive() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);
        let gateway = gateway(&azure, &lovo);

        for hint in [Some("browser"), Some("polly"), None] {
            let output = gateway
                .synthesize("はい", TeacherVoice::Nanami, hint)
                .await
                .unwrap();
            assert_eq!(output.kind(), "clientDirective");
        }
        assert_eq!(azure.calls() + lovo.calls(), 0);
    }

    #[tokio::test]
    async fn default_provider_applies_when_hint_missing() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);
        let gateway = SpeechGateway::new(
            FallbackChain::new(vec![
                SpeechRoute::new(azure.clone()),
                SpeechRoute::new(lovo),
            ]),
            "azure",
        );

        let output = gateway
            .synthesize("はい", TeacherVoice::Nanami, None)
            .await
            .unwrap();
        assert!(output.is_audio());
        assert_eq!(azure.calls(), 1);
    }

    #[tokio::test]
    async fn empty_text_is_the_only_error() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, true, false);

        let err = gateway(&azure, &lovo)
            .synthesize("  ", TeacherVoice::Nanami, Some("azure"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText));
    }

    #[test]
    fn plan_follows_chain_order() {
        let azure = ScriptedTts::new(SpeechProvider::Azure, true, false);
        let lovo = ScriptedTts::new(SpeechProvider::Lovo, false, false);
        let chain = FallbackChain::new(vec![SpeechRoute::new(azure), SpeechRoute::new(lovo)]);

        assert_eq!(chain.plan("azure"), RouteDecision::Backend(SpeechProvider::Azure));
        assert_eq!(chain.plan("lovo"), RouteDecision::Directive);
        assert_eq!(chain.plan("browser"), RouteDecision::Directive);
        assert_eq!(chain.configured(), vec![SpeechProvider::Azure]);
    }

    #[test]
    fn chain_from_default_config_has_no_usable_routes() {
        let chain = FallbackChain::from_config(&SpeechConfig::default()).unwrap();
        assert!(chain.configured().is_empty());
        assert_eq!(chain.plan("azure"), RouteDecision::Directive);
    }
}
