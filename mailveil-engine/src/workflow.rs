//! Batch workflow: language detection, date/time detection and
//! pseudonymization per email record, sequentially or across a rayon pool.

use std::sync::Arc;

use mailveil_core::config::{PseudonymizeConfig, WorkflowSettings};
use mailveil_core::errors::MailveilResult;
use mailveil_core::models::{EmailRecord, EntityCategory, RedactionFlags};
use mailveil_core::traits::INerModel;
use mailveil_datetime::TimeDetector;
use mailveil_lang::LangRouter;
use mailveil_models::{AnalyzerLoader, PipelineLoader};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cleanup::clean_up_content;
use crate::pseudonymize::Pseudonymize;
use crate::pseudonyms::{case_variants, PseudonymTable};

/// Drives the full pipeline for a stream of email records.
///
/// One workflow owns one engine and must not process two emails
/// concurrently; the parallel driver replicates workflows per worker.
pub struct Workflow {
    config: PseudonymizeConfig,
    analyzers: Arc<AnalyzerLoader>,
    router: Option<LangRouter>,
    detector: Option<TimeDetector>,
    engine: Pseudonymize,
}

impl Workflow {
    /// Build a workflow with transformer pipelines resolved through the
    /// process-wide loader. Model load failures are fatal.
    pub fn from_settings(settings: &WorkflowSettings) -> MailveilResult<Self> {
        let config = settings.pseudonymize.clone();
        let pipelines = PipelineLoader::new();
        // the NER model is only loaded when the entities stage can run
        let ner: Arc<dyn INerModel> = if config.pseudo_ne {
            pipelines.get_ner(config.ner_pipeline.as_ref())?
        } else {
            Arc::new(NoopNer)
        };
        let router = if config.default_lang.is_empty() {
            Some(LangRouter::new(
                config.lang_detection_lib,
                None,
                &pipelines,
                config.lang_pipeline.as_ref(),
            )?)
        } else {
            None
        };
        Ok(Self::assemble(config, ner, router))
    }

    /// Build a workflow around caller-supplied model implementations.
    pub fn with_components(
        settings: &WorkflowSettings,
        ner: Arc<dyn INerModel>,
        router: Option<LangRouter>,
    ) -> Self {
        Self::assemble(settings.pseudonymize.clone(), ner, router)
    }

    fn assemble(
        config: PseudonymizeConfig,
        ner: Arc<dyn INerModel>,
        router: Option<LangRouter>,
    ) -> Self {
        let analyzers = Arc::new(AnalyzerLoader::new());
        let detector = config
            .datetime_detection
            .then(|| TimeDetector::new(config.time_parsing));
        let engine = Pseudonymize::new(
            ner,
            analyzers.clone(),
            PseudonymTable::from_config(&config.pseudo_first_names),
        )
        .with_analyzer_model(config.analyzer_model.clone());
        Self {
            config,
            analyzers,
            router,
            detector,
            engine,
        }
    }

    pub fn engine(&self) -> &Pseudonymize {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Pseudonymize {
        &mut self.engine
    }

    fn flags(&self) -> RedactionFlags {
        RedactionFlags {
            emails: self.config.pseudo_emailaddresses,
            entities: self.config.pseudo_ne,
            numbers: self.config.pseudo_numbers,
        }
    }

    /// Process one email record in place: clean, route language, detect
    /// dates, pseudonymize body (with collision recovery) and subject.
    pub fn process_email(&mut self, record: &mut EmailRecord) -> MailveilResult<()> {
        if record.content == self.config.unmatched_keyword {
            debug!("content matches the unmatched keyword, skipping");
            return Ok(());
        }

        let (cleaned, _) = clean_up_content(&record.content);
        record.cleaned_content = Some(cleaned.clone());

        let lang = if !self.config.default_lang.is_empty() {
            self.config.default_lang.clone()
        } else {
            let detected = match &self.router {
                Some(router) => router.detect_language(&cleaned)?.map(|d| d.lang),
                None => None,
            };
            match detected {
                Some(lang) => lang,
                None => {
                    warn!("no language detected and no default configured, skipping email");
                    return Ok(());
                }
            }
        };
        record.lang = Some(lang.clone());

        if let Some(detector) = &self.detector {
            let analyzer = self.analyzers.get(&lang, &self.config.analyzer_model)?;
            let spans = detector.get_date_time_text(&cleaned, analyzer.as_ref())?;
            record.detected_datetime = spans.into_iter().map(|s| s.surface).collect();
        }

        let flags = self.flags();
        let (mut pseudo, mut collided) =
            self.engine
                .pseudonymize(&cleaned, &lang, &record.detected_datetime, flags, None)?;
        while collided {
            info!("re-running substitution after pseudonym collision");
            let (output, again) = self.engine.pseudonymize_with_updated_ne(
                None,
                None,
                &lang,
                &record.detected_datetime,
                flags,
                None,
            )?;
            pseudo = output;
            collided = again;
        }

        record.pseudo_content = Some(pseudo);
        record.ne_list = self.engine.ne_list().to_vec();
        record.sentences = self.engine.sentences().to_vec();
        record.sentences_after_email = self.engine.sentences_after_email().to_vec();

        // subject is processed independently but shares pseudonym identity
        // with the body through the carried entity list
        if let Some(subject) = record.subject.clone() {
            if !subject.trim().is_empty() {
                let (subject_clean, _) = clean_up_content(&subject);
                let body_entities = record.ne_list.clone();
                let (mut pseudo_subject, mut subject_collided) = self.engine.pseudonymize(
                    &subject_clean,
                    &lang,
                    &[],
                    flags,
                    Some(&body_entities),
                )?;
                while subject_collided {
                    let (output, again) = self.engine.pseudonymize_with_updated_ne(
                        None,
                        None,
                        &lang,
                        &[],
                        flags,
                        Some(&body_entities),
                    )?;
                    pseudo_subject = output;
                    subject_collided = again;
                }
                record.pseudo_subject = Some(pseudo_subject);
            }
        }
        Ok(())
    }

    /// Process records sequentially. Per-email failures abort only that
    /// email; the failure count is returned.
    pub fn process_batch(&mut self, records: &mut [EmailRecord]) -> usize {
        let mut failures = 0;
        for record in records.iter_mut() {
            if let Err(err) = self.process_email(record) {
                warn!(%err, "email aborted");
                failures += 1;
            }
        }
        failures
    }

    /// Process records across the rayon pool, one replicated workflow per
    /// worker, then reconcile this workflow's pseudonym table against the
    /// person surfaces the batch produced. Returns the failure count.
    pub fn process_batch_parallel<F>(
        &mut self,
        records: &mut [EmailRecord],
        factory: F,
    ) -> MailveilResult<usize>
    where
        F: Fn() -> MailveilResult<Workflow> + Sync,
    {
        let failures = records
            .par_iter_mut()
            .map_init(
                || factory(),
                |workflow, record| match workflow {
                    Ok(workflow) => match workflow.process_email(record) {
                        Ok(()) => 0,
                        Err(err) => {
                            warn!(%err, "email aborted");
                            1
                        }
                    },
                    Err(err) => {
                        warn!(%err, "worker workflow construction failed");
                        1
                    }
                },
            )
            .sum();

        // post-batch reconciliation of the shared table
        for record in records.iter() {
            let Some(lang) = &record.lang else { continue };
            let mut forbidden = Vec::new();
            for ne in &record.ne_list {
                if ne.category != EntityCategory::Per {
                    continue;
                }
                if let Some(first_token) = ne.word.split_whitespace().next() {
                    for variant in case_variants(first_token) {
                        if !forbidden.contains(&variant) {
                            forbidden.push(variant);
                        }
                    }
                }
            }
            if !forbidden.is_empty() {
                self.engine.table_mut().remove_colliding(lang, &forbidden)?;
            }
        }
        Ok(failures)
    }
}

/// Serialize processed records to pretty JSON (entity confidence scores are
/// dropped by the record's serialization rules).
pub fn to_json(records: &[EmailRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Stand-in used when the entities stage is disabled.
struct NoopNer;

impl INerModel for NoopNer {
    fn recognize(
        &self,
        _sentence: &str,
    ) -> MailveilResult<Vec<mailveil_core::models::NamedEntity>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "noop"
    }
}
