use std::{
    collections::BTreeMap,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, ValueEnum};
use cluster_config::{
    api::ContainerService,
    cloud::CloudRegistry,
    defaults::DefaultsParams,
    image::{self, ImageOverride},
    loader::{self, load_container_service, serialize_container_service},
    logging::{self, initialize_logging},
    vlabs,
};
use cluster_version::{Platform, VersionTable};
use snafu::{ResultExt, Snafu};
use tracing::info;

const APP_NAME: &str = "cluster-resolve";
const LOG_ENV: &str = "CLUSTER_RESOLVE_LOG";

/// Path that makes the input be read from stdin.
const STDIN: &str = "-";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitializeLogging { source: logging::Error },

    #[snafu(display("failed to read {}", path.display()))]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to load the cluster definition {}", path.display()))]
    LoadDocument {
        source: loader::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to serialize the resolved cluster definition"))]
    SerializeDocument { source: loader::Error },

    #[snafu(display("failed to re-read the resolved cluster definition"))]
    ReparseDocument { source: serde_json::Error },

    #[snafu(display("failed to render the resolved cluster definition as YAML"))]
    RenderYaml { source: serde_yaml::Error },

    #[snafu(display("failed to parse the image overrides in {}", path.display()))]
    ParseOverrides {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to resolve the image {image:?}"))]
    ResolveImage { source: image::Error, image: String },

    #[snafu(display("failed to serialize the cluster definition schema"))]
    SerializeSchema { source: serde_json::Error },

    #[snafu(display("failed to write the output"))]
    WriteOutput { source: std::io::Error },
}

#[derive(Debug, Parser)]
#[command(name = APP_NAME, author, version, about)]
enum Command {
    /// Resolve a cluster definition and print the fully defaulted document.
    Resolve(ResolveArguments),

    /// Print the image a component resolves to.
    Image(ImageArguments),

    /// List the orchestrator versions available for a platform.
    Versions(VersionsArguments),

    /// Print the JSON schema of the cluster definition.
    Schema,
}

#[derive(Debug, Args)]
struct ResolveArguments {
    /// The cluster definition to resolve, `-` reads from stdin.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The definition of the already deployed cluster. Values pinned by the
    /// deployment are carried over into the resolved document.
    #[arg(long, value_name = "FILE")]
    existing: Option<PathBuf>,

    /// Resolve for an upgrade of an existing cluster.
    #[arg(long, conflicts_with = "scale")]
    upgrade: bool,

    /// Resolve for scaling an existing cluster.
    #[arg(long)]
    scale: bool,

    /// Skip the unknown field and semantic checks.
    #[arg(long)]
    skip_validation: bool,

    #[arg(long, short, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ImageArguments {
    /// The bare image, e.g. `kube-apiserver:v1.22.16`.
    image: String,

    /// The registry and repository the image is placed below.
    #[arg(long, default_value = "mcr.microsoft.com/oss/kubernetes/")]
    base: String,

    /// A JSON object mapping untagged references to image overrides.
    #[arg(long, value_name = "FILE")]
    overrides: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct VersionsArguments {
    /// Include Windows agent pools.
    #[arg(long)]
    windows: bool,

    /// Target Azure Stack Hub.
    #[arg(long)]
    azure_stack: bool,

    /// List the versions an existing cluster may be upgraded to.
    #[arg(long)]
    upgrade: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let command = Command::parse();
    initialize_logging(LOG_ENV, APP_NAME).context(InitializeLoggingSnafu)?;

    let output = match command {
        Command::Resolve(arguments) => resolve(&arguments)?,
        Command::Image(arguments) => resolve_image(&arguments)?,
        Command::Versions(arguments) => list_versions(&arguments),
        Command::Schema => print_schema()?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context(WriteOutputSnafu)
}

fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    if path.as_os_str() == STDIN {
        let mut input = Vec::new();
        std::io::stdin()
            .read_to_end(&mut input)
            .context(ReadFileSnafu { path })?;
        Ok(input)
    } else {
        std::fs::read(path).context(ReadFileSnafu { path })
    }
}

fn resolve(arguments: &ResolveArguments) -> Result<String, Error> {
    let params = DefaultsParams {
        is_upgrade: arguments.upgrade,
        is_scale: arguments.scale,
    };

    let existing: Option<ContainerService> = arguments
        .existing
        .as_deref()
        .map(|path| {
            let input = read_input(path)?;
            load_container_service(&input, false, true, None)
                .map(|(container_service, _)| container_service)
                .context(LoadDocumentSnafu { path })
        })
        .transpose()?;

    let input = read_input(&arguments.input)?;
    let (mut container_service, version) = load_container_service(
        &input,
        !arguments.skip_validation,
        params.is_update(),
        existing.as_ref(),
    )
    .context(LoadDocumentSnafu {
        path: &arguments.input,
    })?;

    container_service.set_defaults(CloudRegistry::builtin(), params);
    info!(
        orchestrator_version = container_service.properties.orchestrator_version(),
        "resolved cluster definition"
    );

    let document =
        serialize_container_service(&container_service, &version).context(SerializeDocumentSnafu)?;
    render(&document, arguments.output)
}

fn render(document: &[u8], format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Json => {
            let mut output = String::from_utf8_lossy(document).into_owned();
            output.push('\n');
            Ok(output)
        }
        OutputFormat::Yaml => {
            let value: serde_json::Value =
                serde_json::from_slice(document).context(ReparseDocumentSnafu)?;
            serde_yaml::to_string(&value).context(RenderYamlSnafu)
        }
    }
}

fn resolve_image(arguments: &ImageArguments) -> Result<String, Error> {
    let overrides: BTreeMap<String, ImageOverride> = match &arguments.overrides {
        Some(path) => {
            let input = read_input(path)?;
            serde_json::from_slice(&input).context(ParseOverridesSnafu { path })?
        }
        None => BTreeMap::new(),
    };

    let image = image::resolve_image(&arguments.base, &arguments.image, &overrides).context(
        ResolveImageSnafu {
            image: &arguments.image,
        },
    )?;
    Ok(format!("{image}\n"))
}

fn list_versions(arguments: &VersionsArguments) -> String {
    let table = VersionTable::for_platform(Platform {
        has_windows: arguments.windows,
        is_azure_stack: arguments.azure_stack,
    });
    let default_version = table.default_version();

    table
        .all_versions(arguments.upgrade)
        .into_iter()
        .map(|version| {
            if default_version.as_ref() == Some(&version) {
                format!("{version} (default)\n")
            } else {
                format!("{version}\n")
            }
        })
        .collect()
}

fn print_schema() -> Result<String, Error> {
    let schema = schemars::schema_for!(vlabs::ContainerService);
    let mut output = serde_json::to_string_pretty(&schema).context(SerializeSchemaSnafu)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const CLUSTER: &str = r#"{
        "apiVersion": "vlabs",
        "location": "westus2",
        "properties": {
            "orchestratorProfile": { "orchestratorType": "Kubernetes", "orchestratorRelease": "1.22" },
            "masterProfile": { "count": 1, "dnsPrefix": "cli", "vmSize": "Standard_D2_v3" },
            "agentPoolProfiles": [{ "name": "linuxpool", "count": 1, "vmSize": "Standard_D2_v3" }]
        }
    }"#;

    #[test]
    fn verify_cli() {
        Command::command().debug_assert();
    }

    #[test]
    fn upgrade_and_scale_conflict() {
        let result = Command::try_parse_from([APP_NAME, "resolve", "--upgrade", "--scale", "a.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn resolves_file_to_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CLUSTER.as_bytes()).unwrap();

        let output = resolve(&ResolveArguments {
            input: file.path().to_owned(),
            existing: None,
            upgrade: false,
            scale: false,
            skip_validation: false,
            output: OutputFormat::Yaml,
        })
        .unwrap();

        assert!(output.contains("apiVersion: vlabs"));
        assert!(output.contains("orchestratorVersion: 1.22.16"));
    }

    #[test]
    fn missing_input_is_reported() {
        let result = resolve(&ResolveArguments {
            input: PathBuf::from("/does/not/exist.json"),
            existing: None,
            upgrade: false,
            scale: false,
            skip_validation: false,
            output: OutputFormat::Json,
        });

        assert!(matches!(result, Err(Error::ReadFile { .. })));
    }

    #[test]
    fn image_without_overrides() {
        let output = resolve_image(&ImageArguments {
            image: "kube-proxy:v1.22.16".to_owned(),
            base: "mcr.microsoft.com/oss/kubernetes/".to_owned(),
            overrides: None,
        })
        .unwrap();

        assert_eq!(output, "mcr.microsoft.com/oss/kubernetes/kube-proxy:v1.22.16\n");
    }

    #[test]
    fn versions_mark_the_default() {
        let output = list_versions(&VersionsArguments {
            windows: false,
            azure_stack: false,
            upgrade: false,
        });

        assert_eq!(output.lines().filter(|l| l.ends_with("(default)")).count(), 1);
        assert!(output.contains("1.24.8"));
    }
}
