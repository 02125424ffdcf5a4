//! Well-known names and default values.

pub const KUBERNETES: &str = "Kubernetes";

// Network plugins and policies
pub const NETWORK_PLUGIN_AZURE: &str = "azure";
pub const NETWORK_PLUGIN_KUBENET: &str = "kubenet";
pub const NETWORK_PLUGIN_FLANNEL: &str = "flannel";
pub const NETWORK_PLUGIN_CILIUM: &str = "cilium";
pub const NETWORK_PLUGIN_ANTREA: &str = "antrea";
pub const NETWORK_POLICY_AZURE: &str = "azure";
pub const NETWORK_POLICY_CALICO: &str = "calico";
pub const NETWORK_POLICY_CILIUM: &str = "cilium";
pub const NETWORK_POLICY_ANTREA: &str = "antrea";
pub const NETWORK_POLICY_NONE: &str = "none";
pub const NETWORK_MODE_TRANSPARENT: &str = "transparent";

// Container runtimes
pub const DOCKER: &str = "docker";
pub const CONTAINERD: &str = "containerd";

// Availability and storage
pub const AVAILABILITY_SET: &str = "AvailabilitySet";
pub const VIRTUAL_MACHINE_SCALE_SETS: &str = "VirtualMachineScaleSets";
pub const STORAGE_ACCOUNT: &str = "StorageAccount";
pub const MANAGED_DISKS: &str = "ManagedDisks";
pub const EPHEMERAL: &str = "Ephemeral";
pub const SCALE_SET_PRIORITY_REGULAR: &str = "Regular";
pub const SCALE_SET_PRIORITY_LOW: &str = "Low";
pub const SCALE_SET_PRIORITY_SPOT: &str = "Spot";
pub const SCALE_SET_EVICTION_POLICY_DELETE: &str = "Delete";
pub const READ_WRITE: &str = "ReadWrite";
pub const READ_ONLY: &str = "ReadOnly";

// Load balancers
pub const BASIC_LOAD_BALANCER_SKU: &str = "Basic";
pub const STANDARD_LOAD_BALANCER_SKU: &str = "Standard";
pub const MAXIMUM_LOAD_BALANCER_RULE_COUNT: i32 = 250;
pub const DEFAULT_OUTBOUND_RULE_IDLE_TIMEOUT_IN_MINUTES: i32 = 30;

// kube-proxy
pub const KUBE_PROXY_MODE_IPTABLES: &str = "iptables";
pub const KUBE_PROXY_MODE_IPVS: &str = "ipvs";

// Identity
pub const CLIENT_SECRET_AUTH_METHOD: &str = "client_secret";
pub const AZURE_AD_IDENTITY_SYSTEM: &str = "azure_ad";
pub const OIDC_AUTHENTICATOR: &str = "OIDC";

// Addons that influence defaulting
pub const FLANNEL_ADDON_NAME: &str = "flannel";
pub const POD_SECURITY_POLICY_ADDON_NAME: &str = "pod-security-policy";
pub const IP_MASQ_AGENT_ADDON_NAME: &str = "ip-masq-agent";

// Component names
pub const API_SERVER_COMPONENT_NAME: &str = "kube-apiserver";
pub const CONTROLLER_MANAGER_COMPONENT_NAME: &str = "kube-controller-manager";
pub const SCHEDULER_COMPONENT_NAME: &str = "kube-scheduler";
pub const CLOUD_CONTROLLER_MANAGER_COMPONENT_NAME: &str = "cloud-controller-manager";
pub const ADDON_MANAGER_COMPONENT_NAME: &str = "kube-addon-manager";

// Counts
pub const MAX_AGENT_COUNT: i32 = 100;
pub const DEFAULT_MASTER_COUNT: i32 = 3;
pub const DEFAULT_AGENT_COUNT: i32 = 3;
pub const DEFAULT_VM_SIZE: &str = "Standard_DS2_v2";
pub const DEFAULT_OS_DISK_SIZE_GB: i32 = 200;
pub const DEFAULT_AGENT_POOL_NAME: &str = "agent";
pub const DEFAULT_ADMIN_USERNAME: &str = "azureuser";
pub const DEFAULT_FAULT_DOMAIN_COUNT_AZURE_STACK: i32 = 3;

// Networking
pub const DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP: &str = "10.240.255.5";
pub const DEFAULT_FIRST_CONSECUTIVE_KUBERNETES_STATIC_IP_VMSS: &str = "10.240.0.4";
pub const DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET: u32 = 5;
pub const DEFAULT_KUBERNETES_FIRST_CONSECUTIVE_STATIC_IP_OFFSET_VMSS: u32 = 4;
pub const DEFAULT_KUBERNETES_MASTER_SUBNET: &str = "10.240.0.0/16";
pub const DEFAULT_KUBERNETES_MASTER_SUBNET_IPV6: &str = "2001:1234:5678:9abc::/64";
pub const DEFAULT_KUBERNETES_SUBNET: &str = "10.240.0.0/12";
pub const DEFAULT_AGENT_SUBNET_VMSS: &str = "10.248.0.0/13";
pub const DEFAULT_KUBERNETES_CLUSTER_SUBNET: &str = "10.244.0.0/16";
pub const DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6: &str = "fc00::/48";
pub const DEFAULT_KUBERNETES_SERVICE_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_KUBERNETES_DNS_SERVICE_IP: &str = "10.0.0.10";
pub const DEFAULT_KUBERNETES_SERVICE_CIDR_IPV6: &str = "fd00::/108";
pub const DEFAULT_KUBERNETES_DNS_SERVICE_IP_IPV6: &str = "fd00::10";
pub const DEFAULT_DOCKER_BRIDGE_SUBNET: &str = "172.17.0.1/16";
pub const DEFAULT_NON_MASQUERADE_CIDR: &str = "0.0.0.0/0";
pub const DEFAULT_MASTER_SUBNET: &str = "172.16.0.0/24";
pub const DEFAULT_FIRST_CONSECUTIVE_STATIC_IP: &str = "172.16.0.5";
pub const DEFAULT_DCOS_MASTER_SUBNET: &str = "192.168.255.0/24";
pub const DEFAULT_DCOS_FIRST_CONSECUTIVE_STATIC_IP: &str = "192.168.255.5";
pub const DEFAULT_DCOS_BOOTSTRAP_STATIC_IP: &str = "192.168.255.240";
pub const DEFAULT_KUBERNETES_MAX_PODS: i32 = 110;
pub const DEFAULT_KUBERNETES_MAX_PODS_VNET_INTEGRATED: i32 = 30;

// Versions
pub const DEFAULT_MOBY_VERSION: &str = "3.0.11";
pub const DEFAULT_CONTAINERD_VERSION: &str = "1.3.2";
pub const DEFAULT_ETCD_VERSION: &str = "3.3.19";
pub const AZURE_CNI_PLUGIN_VERSION: &str = "v1.1.2";
pub const CNI_PLUGIN_VERSION: &str = "v0.8.5";
pub const KUBERNETES_WINDOWS_DOCKER_VERSION: &str = "19.03.5";
pub const KUBERNETES_DEFAULT_WINDOWS_SKU: &str = "Datacenter-Core-1809-with-Containers-smalldisk";

// etcd
pub const DEFAULT_ETCD_DISK_SIZE: &str = "256";
pub const DEFAULT_ETCD_DISK_SIZE_GT3_NODES: &str = "512";
pub const DEFAULT_ETCD_DISK_SIZE_GT10_NODES: &str = "1024";
pub const DEFAULT_ETCD_DISK_SIZE_GT20_NODES: &str = "2048";
pub const MAX_AZURE_STACK_MANAGED_DISK_SIZE: &str = "1023";
pub const DEFAULT_MASTER_ETCD_CLIENT_PORT: u16 = 2379;

// kubelet
pub const DEFAULT_KUBELET_NODE_STATUS_UPDATE_FREQUENCY: &str = "10s";
pub const DEFAULT_KUBERNETES_HARD_EVICTION_THRESHOLD: &str =
    "memory.available<750Mi,nodefs.available<10%,nodefs.inodesFree<5%";
pub const DEFAULT_KUBELET_EVENT_QPS: &str = "0";
pub const DEFAULT_KUBELET_CADVISOR_PORT: &str = "0";
pub const DEFAULT_KUBELET_POD_MAX_PIDS: i32 = -1;
pub const DEFAULT_KUBERNETES_GC_HIGH_THRESHOLD: i32 = 85;
pub const DEFAULT_KUBERNETES_GC_LOW_THRESHOLD: i32 = 80;
pub const MASTER_NODE_TAINT: &str = "node-role.kubernetes.io/master=true:NoSchedule";

// controller-manager
pub const DEFAULT_KUBERNETES_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD: &str = "40s";
pub const DEFAULT_KUBERNETES_CTRL_MGR_POD_EVICTION_TIMEOUT: &str = "5m0s";
pub const DEFAULT_KUBERNETES_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD: &str = "10s";
pub const DEFAULT_KUBERNETES_CTRL_MGR_TERMINATED_POD_GC_THRESHOLD: &str = "5000";
pub const DEFAULT_KUBERNETES_CTRL_MGR_USE_SVC_ACCOUNT_CREDS: &str = "false";
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_ROUTE_RECONCILIATION_PERIOD: &str = "10s";

// Azure Stack
pub const DEFAULT_AZURE_STACK_KUBELET_NODE_STATUS_UPDATE_FREQUENCY: &str = "1m";
pub const DEFAULT_AZURE_STACK_CTRL_MGR_ROUTE_RECONCILIATION_PERIOD: &str = "1m";
pub const DEFAULT_AZURE_STACK_CTRL_MGR_NODE_MONITOR_GRACE_PERIOD: &str = "5m";
pub const DEFAULT_AZURE_STACK_CTRL_MGR_POD_EVICTION_TIMEOUT: &str = "5m";
pub const DEFAULT_AZURE_STACK_DEPLOY_TELEMETRY_PID: &str =
    "pid-1bda96ec-adf4-4eea-bb9a-8462de5475c0";

// Profiling
pub const DEFAULT_KUBERNETES_API_SERVER_ENABLE_PROFILING: &str = "false";
pub const DEFAULT_KUBERNETES_CTR_MGR_ENABLE_PROFILING: &str = "false";
pub const DEFAULT_KUBERNETES_SCHEDULER_ENABLE_PROFILING: &str = "false";

// Cloud provider backoff and rate limits
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_RETRIES: i32 = 6;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_JITTER: f64 = 1.0;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_DURATION: i32 = 5;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_BACKOFF_EXPONENT: f64 = 1.5;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS: f64 = 3.0;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE: f64 = 1.0;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET: i32 = 10;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE: i32 = 10;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_RETRIES: i32 = 1;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_JITTER: f64 = 1.0;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_DURATION: i32 = 30;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_BACKOFF_EXPONENT: f64 = 1.5;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS: f64 = 3.0;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_QPS_WRITE: f64 = 3.0;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET: i32 = 10;
pub const DEFAULT_AZURE_STACK_CLOUD_PROVIDER_RATE_LIMIT_BUCKET_WRITE: i32 = 10;

// Pool and master flags
pub const DEFAULT_PRESERVE_NODES_PROPERTIES: bool = true;
pub const DEFAULT_ENABLE_VMSS_NODE_PUBLIC_IP: bool = false;
pub const DEFAULT_VMSS_OVER_PROVISIONING_ENABLED: bool = false;
pub const DEFAULT_AUDIT_D_ENABLED: bool = false;
pub const DEFAULT_ACCELERATED_NETWORKING: bool = true;
pub const DEFAULT_ACCELERATED_NETWORKING_WINDOWS: bool = false;
pub const DEFAULT_WINDOWS_SSH_ENABLED: bool = true;
pub const DEFAULT_USE_COSMOS: bool = false;
pub const DEFAULT_SINGLE_PLACEMENT_GROUP: bool = true;
pub const DEFAULT_JUMPBOX_DISK_SIZE: i32 = 30;
pub const DEFAULT_JUMPBOX_USERNAME: &str = "azureuser";
pub const VHD_DISK_SIZE_AKS: i32 = 30;
pub const DEFAULT_EXTENSIONS_ROOT_URL: &str = "https://raw.githubusercontent.com/Azure/aks-engine/master/";
pub const DEFAULT_DCOS_BOOTSTRAP_VM_SIZE: &str = "Standard_D2s_v3";

pub const TLS_STRONG_CIPHER_SUITES_API_SERVER: &str = "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA";
pub const TLS_STRONG_CIPHER_SUITES_KUBELET: &str = "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305,TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_256_GCM_SHA384,TLS_RSA_WITH_AES_128_GCM_SHA256";

// Cluster-wide toggles
pub const DEFAULT_RBAC_ENABLED: bool = true;
pub const DEFAULT_SECURE_KUBELET_ENABLED: bool = true;
pub const DEFAULT_USE_INSTANCE_METADATA: bool = true;
pub const DEFAULT_AZURE_STACK_USE_INSTANCE_METADATA: bool = false;
pub const DEFAULT_PRIVATE_CLUSTER_ENABLED: bool = false;
pub const DEFAULT_EXCLUDE_MASTER_FROM_STANDARD_LB: bool = true;
pub const DEFAULT_KUBERNETES_CLOUD_PROVIDER_RATE_LIMIT: bool = true;
pub const DEFAULT_AZURE_STACK_ACCELERATED_NETWORKING: bool = false;
pub const DEFAULT_AZURE_STACK_LOAD_BALANCER_SKU: &str = BASIC_LOAD_BALANCER_SKU;
pub const DEFAULT_AZURE_STACK_AVAILABILITY_PROFILE: &str = AVAILABILITY_SET;
pub const DEFAULT_PLATFORM_UPDATE_DOMAIN_COUNT: i32 = 3;
pub const DEFAULT_CONTAINER_RUNTIME: &str = DOCKER;
pub const DEFAULT_NETWORK_PLUGIN: &str = NETWORK_PLUGIN_AZURE;
pub const DEFAULT_KUBE_PROXY_MODE: &str = KUBE_PROXY_MODE_IPTABLES;
pub const CLOUD_PROVIDER_BACKOFF_MODE_V1: &str = "v1";
pub const CLOUD_PROVIDER_BACKOFF_MODE_V2: &str = "v2";
pub const MIN_CLOUD_PROVIDER_QPS_TO_BUCKET_FACTOR: f64 = 0.1;

// Image bases
pub const KUBERNETES_IMAGE_BASE_TYPE_GCR: &str = "gcr";
pub const KUBERNETES_IMAGE_BASE_TYPE_MCR: &str = "mcr";
/// Appended to the tag of control plane images on Azure Stack.
pub const AZURE_STACK_SUFFIX: &str = "-azs";

// Non-Kubernetes subnets
pub const DEFAULT_SWARM_WINDOWS_MASTER_SUBNET: &str = "192.168.255.0/24";
pub const DEFAULT_SWARM_WINDOWS_FIRST_CONSECUTIVE_STATIC_IP: &str = "192.168.255.5";
pub const DEFAULT_DCOS_BOOTSTRAP_MIN_VERSION: &str = "1.11.0";
pub const DEFAULT_KUBERNETES_CLUSTER_SUBNET_IPV6_LEGACY: &str = "fc00::/8";

pub const LATEST_IMAGE_VERSION: &str = "latest";

pub const DEFAULT_KUBERNETES_CLUSTER_DOMAIN: &str = "cluster.local";
pub const DEFAULT_AUDIT_POLICY_FILE: &str = "/etc/kubernetes/addons/audit-policy.yaml";
pub const LEGACY_AUDIT_POLICY_FILE: &str = "/etc/kubernetes/manifests/audit-policy.yaml";
